//! Two-step customer lookup: email search, then metafield fetch.

use custmeta_core::{fold_metafields, Customer, MetafieldMap, ShopDomain};

use crate::directory::CustomerDirectory;
use crate::error::AdminApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    NotFound,
    Found {
        customer: Customer,
        metafields: MetafieldMap,
    },
}

/// Looks up the first customer matching `email` on `shop` and merges in its
/// metafields.
///
/// The metafield request is only issued once a customer has been found. A
/// failure in either call fails the whole lookup.
///
/// # Errors
///
/// Propagates any [`AdminApiError`] from the directory unchanged.
pub async fn lookup_customer(
    directory: &dyn CustomerDirectory,
    shop: &ShopDomain,
    email: &str,
) -> Result<LookupOutcome, AdminApiError> {
    let Some(customer) = directory.search_customer_by_email(shop, email).await? else {
        return Ok(LookupOutcome::NotFound);
    };

    let metafields = directory.fetch_metafields(shop, customer.id).await?;
    tracing::debug!(
        %shop,
        customer_id = customer.id,
        metafield_count = metafields.len(),
        "customer matched"
    );

    Ok(LookupOutcome::Found {
        customer,
        metafields: fold_metafields(metafields),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use custmeta_core::Metafield;
    use serde_json::json;

    use super::*;

    struct StubDirectory {
        customer: Option<Customer>,
        metafields: Result<Vec<Metafield>, u16>,
        metafield_calls: AtomicUsize,
    }

    impl StubDirectory {
        fn new(customer: Option<Customer>, metafields: Result<Vec<Metafield>, u16>) -> Self {
            Self {
                customer,
                metafields,
                metafield_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CustomerDirectory for StubDirectory {
        async fn search_customer_by_email(
            &self,
            _shop: &ShopDomain,
            _email: &str,
        ) -> Result<Option<Customer>, AdminApiError> {
            Ok(self.customer.clone())
        }

        async fn fetch_metafields(
            &self,
            _shop: &ShopDomain,
            _customer_id: i64,
        ) -> Result<Vec<Metafield>, AdminApiError> {
            self.metafield_calls.fetch_add(1, Ordering::SeqCst);
            self.metafields
                .clone()
                .map_err(|status| AdminApiError::UnexpectedStatus {
                    status,
                    path: "/admin/api/2024-07/customers/1/metafields.json".to_string(),
                    body: String::new(),
                })
        }
    }

    fn shop() -> ShopDomain {
        ShopDomain::parse("acme.myshopify.com").unwrap()
    }

    fn customer() -> Customer {
        Customer {
            id: 1,
            email: Some("jane@example.com".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
        }
    }

    #[tokio::test]
    async fn not_found_skips_metafield_fetch() {
        let stub = StubDirectory::new(None, Ok(Vec::new()));
        let outcome = lookup_customer(&stub, &shop(), "nobody@example.com")
            .await
            .expect("lookup");
        assert_eq!(outcome, LookupOutcome::NotFound);
        assert_eq!(stub.metafield_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn found_folds_metafields() {
        let stub = StubDirectory::new(
            Some(customer()),
            Ok(vec![
                Metafield {
                    namespace: "custom".to_string(),
                    key: "size".to_string(),
                    value: json!("L"),
                },
                Metafield {
                    namespace: "custom".to_string(),
                    key: "size".to_string(),
                    value: json!("XL"),
                },
            ]),
        );
        let outcome = lookup_customer(&stub, &shop(), "jane@example.com")
            .await
            .expect("lookup");
        let LookupOutcome::Found {
            customer,
            metafields,
        } = outcome
        else {
            panic!("expected Found");
        };
        assert_eq!(customer.id, 1);
        assert_eq!(metafields["custom:size"], json!("XL"));
        assert_eq!(stub.metafield_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn metafield_failure_fails_whole_lookup() {
        let stub = StubDirectory::new(Some(customer()), Err(503));
        let result = lookup_customer(&stub, &shop(), "jane@example.com").await;
        assert!(
            matches!(
                result,
                Err(AdminApiError::UnexpectedStatus { status: 503, .. })
            ),
            "expected UnexpectedStatus(503), got: {result:?}"
        );
    }
}
