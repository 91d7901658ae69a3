use async_trait::async_trait;
use custmeta_core::{Customer, Metafield, ShopDomain};

use crate::error::AdminApiError;

/// Source of customer records and their metafields for a shop.
///
/// [`crate::ShopifyAdminClient`] is the production implementation; tests
/// substitute in-memory stubs.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// First customer whose email exactly matches `email`, or `None`.
    async fn search_customer_by_email(
        &self,
        shop: &ShopDomain,
        email: &str,
    ) -> Result<Option<Customer>, AdminApiError>;

    /// All metafields attached to `customer_id`, in upstream order.
    async fn fetch_metafields(
        &self,
        shop: &ShopDomain,
        customer_id: i64,
    ) -> Result<Vec<Metafield>, AdminApiError>;
}
