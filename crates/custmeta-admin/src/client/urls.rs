//! Admin API URL construction.

use custmeta_core::ShopDomain;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::AdminApiError;

/// Characters left unescaped in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
///
/// `+` must become `%2B`, otherwise upstream decodes it as a space and the
/// exact-match email search misses.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single query component.
pub(super) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub(super) fn admin_base(scheme: &str, shop: &ShopDomain, api_version: &str) -> String {
    format!("{scheme}://{shop}/admin/api/{api_version}")
}

/// `.../customers/search.json?query=email:{encoded email}`
pub(super) fn customer_search_url(
    scheme: &str,
    shop: &ShopDomain,
    api_version: &str,
    email: &str,
) -> Result<Url, AdminApiError> {
    let raw = format!(
        "{base}/customers/search.json?query=email:{email}",
        base = admin_base(scheme, shop, api_version),
        email = encode_component(email),
    );
    parse(raw)
}

/// `.../customers/{id}/metafields.json`
pub(super) fn customer_metafields_url(
    scheme: &str,
    shop: &ShopDomain,
    api_version: &str,
    customer_id: i64,
) -> Result<Url, AdminApiError> {
    let raw = format!(
        "{base}/customers/{customer_id}/metafields.json",
        base = admin_base(scheme, shop, api_version),
    );
    parse(raw)
}

fn parse(raw: String) -> Result<Url, AdminApiError> {
    Url::parse(&raw).map_err(|e| AdminApiError::InvalidUrl {
        reason: e.to_string(),
        url: raw,
    })
}
