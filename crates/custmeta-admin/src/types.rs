//! Response envelopes for the Admin REST endpoints used by the lookup.
//!
//! Both endpoints wrap their payload in a single top-level array field. A
//! body that omits the field, or sends `null`, is treated as an empty list.

use custmeta_core::{Customer, Metafield};
use serde::Deserialize;

/// `GET /admin/api/{version}/customers/search.json`
#[derive(Debug, Deserialize)]
pub struct CustomerSearchResponse {
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
}

impl CustomerSearchResponse {
    /// First match in upstream order, if any.
    #[must_use]
    pub fn into_first(self) -> Option<Customer> {
        self.customers.unwrap_or_default().into_iter().next()
    }
}

/// `GET /admin/api/{version}/customers/{id}/metafields.json`
#[derive(Debug, Deserialize)]
pub struct MetafieldsResponse {
    #[serde(default)]
    pub metafields: Option<Vec<Metafield>>,
}

impl MetafieldsResponse {
    #[must_use]
    pub fn into_metafields(self) -> Vec<Metafield> {
        self.metafields.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_missing_field_is_empty() {
        let parsed: CustomerSearchResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.into_first().is_none());
    }

    #[test]
    fn search_response_null_field_is_empty() {
        let parsed: CustomerSearchResponse =
            serde_json::from_str(r#"{"customers": null}"#).expect("parse");
        assert!(parsed.into_first().is_none());
    }

    #[test]
    fn search_response_takes_first_customer() {
        let parsed: CustomerSearchResponse = serde_json::from_str(
            r#"{"customers": [
                {"id": 1, "email": "a@example.com", "first_name": "A", "last_name": "One"},
                {"id": 2, "email": "a@example.com", "first_name": "B", "last_name": "Two"}
            ]}"#,
        )
        .expect("parse");
        assert_eq!(parsed.into_first().map(|c| c.id), Some(1));
    }

    #[test]
    fn metafields_response_missing_field_is_empty() {
        let parsed: MetafieldsResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.into_metafields().is_empty());
    }
}
