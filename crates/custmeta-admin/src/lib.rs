pub mod client;
pub mod directory;
pub mod error;
pub mod lookup;
pub mod types;

pub use client::ShopifyAdminClient;
pub use directory::CustomerDirectory;
pub use error::AdminApiError;
pub use lookup::{lookup_customer, LookupOutcome};
pub use types::{CustomerSearchResponse, MetafieldsResponse};
