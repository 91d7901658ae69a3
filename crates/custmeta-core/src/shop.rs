//! Validated shop host used to build Admin API URLs.

use std::fmt;

use crate::CoreError;

/// A bare shop authority: `host` or `host:port`, e.g. `acme.myshopify.com`.
///
/// The value is interpolated straight into upstream URLs, so anything that
/// could change the request target (scheme, userinfo, path, query, fragment)
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Validates and wraps a shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShopDomain`] if `raw` is empty, contains URL
    /// delimiters or whitespace, has an empty or malformed host label, or an
    /// unparseable port.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &'static str| CoreError::InvalidShopDomain {
            domain: raw.to_owned(),
            reason,
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if trimmed
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '@') || c.is_whitespace())
        {
            return Err(invalid("must be a bare host without scheme or path"));
        }

        let (host, port) = match trimmed.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (trimmed, None),
        };

        if let Some(port) = port {
            port.parse::<u16>()
                .map_err(|_| invalid("port is not a number between 0 and 65535"))?;
        }

        let labels_ok = host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
        if !labels_ok {
            return Err(invalid("host must be dot-separated alphanumeric labels"));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
