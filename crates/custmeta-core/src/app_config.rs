use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which browser origins may call the API.
///
/// `AllowList` origins are stored without a trailing slash, matching the
/// form browsers send in the `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AllowAll,
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Returns `true` if a request carrying `origin` should be served.
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        match self {
            CorsPolicy::AllowAll => true,
            CorsPolicy::AllowList(origins) => origins.iter().any(|o| o == origin),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
    pub upstream_timeout_secs: u64,
    pub cors_policy: CorsPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shopify_access_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("cors_policy", &self.cors_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_accepts_any_origin() {
        assert!(CorsPolicy::AllowAll.allows("https://anything.example"));
    }

    #[test]
    fn allow_list_matches_exact_origin_only() {
        let policy = CorsPolicy::AllowList(vec!["https://app.example.com".to_string()]);
        assert!(policy.allows("https://app.example.com"));
        assert!(!policy.allows("https://app.example.com.evil.test"));
        assert!(!policy.allows("http://app.example.com"));
    }

    #[test]
    fn debug_output_redacts_access_token() {
        let cfg = AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_string(),
            shopify_access_token: "shpat_super_secret".to_string(),
            shopify_api_version: "2024-07".to_string(),
            upstream_timeout_secs: 30,
            cors_policy: CorsPolicy::AllowAll,
        };
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("shpat_super_secret"));
        assert!(debug.contains("[redacted]"));
    }
}
