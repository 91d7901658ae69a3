//! HTTP client for the Shopify Admin REST API.

mod urls;

use std::time::Duration;

use async_trait::async_trait;
use custmeta_core::{Customer, Metafield, ShopDomain};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::directory::CustomerDirectory;
use crate::error::AdminApiError;
use crate::types::{CustomerSearchResponse, MetafieldsResponse};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const USER_AGENT: &str = "custmeta/0.1 (customer-lookup)";

/// Upper bound on how much of an error body is kept for logging.
const ERROR_BODY_LIMIT: usize = 512;

/// Client for the Shopify Admin REST API.
///
/// Holds one pooled `reqwest::Client`, the static access token and the API
/// version. The shop is supplied per call, so a single client serves every
/// store the token is valid for.
///
/// Non-2xx responses are surfaced as [`AdminApiError::UnexpectedStatus`].
/// There is no retry: the first failure is returned to the caller.
pub struct ShopifyAdminClient {
    client: Client,
    access_token: String,
    api_version: String,
    scheme: String,
}

impl ShopifyAdminClient {
    /// Creates a client that talks HTTPS to `https://{shop}/admin/api/{api_version}`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, AdminApiError> {
        Self::with_scheme(access_token, api_version, timeout_secs, "https")
    }

    /// Creates a client with an explicit URL scheme (for testing with wiremock
    /// over plain HTTP).
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_scheme(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        scheme: &str,
    ) -> Result<Self, AdminApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
            scheme: scheme.to_owned(),
        })
    }

    /// Searches for customers whose email exactly matches `email` and returns
    /// the first one in upstream order.
    ///
    /// # Errors
    ///
    /// - [`AdminApiError::Http`] on network failure or timeout.
    /// - [`AdminApiError::UnexpectedStatus`] on any non-2xx status.
    /// - [`AdminApiError::Deserialize`] if the body is not a search envelope.
    pub async fn search_customer(
        &self,
        shop: &ShopDomain,
        email: &str,
    ) -> Result<Option<Customer>, AdminApiError> {
        let url = urls::customer_search_url(&self.scheme, shop, &self.api_version, email)?;
        let response: CustomerSearchResponse = self
            .get_json(url, &format!("customer search on {shop}"))
            .await?;
        Ok(response.into_first())
    }

    /// Fetches all metafields attached to `customer_id`, in upstream order.
    ///
    /// # Errors
    ///
    /// Same as [`ShopifyAdminClient::search_customer`].
    pub async fn customer_metafields(
        &self,
        shop: &ShopDomain,
        customer_id: i64,
    ) -> Result<Vec<Metafield>, AdminApiError> {
        let url =
            urls::customer_metafields_url(&self.scheme, shop, &self.api_version, customer_id)?;
        let response: MetafieldsResponse = self
            .get_json(url, &format!("metafields of customer {customer_id} on {shop}"))
            .await?;
        Ok(response.into_metafields())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, AdminApiError> {
        tracing::debug!(path = url.path(), "admin api request");

        let response = self
            .client
            .get(url.as_str())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(strip_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminApiError::UnexpectedStatus {
                status: status.as_u16(),
                path: url.path().to_owned(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await.map_err(strip_url)?;
        serde_json::from_str::<T>(&body).map_err(|e| AdminApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// reqwest embeds the full request URL, query included, in its errors.
fn strip_url(err: reqwest::Error) -> AdminApiError {
    AdminApiError::Http(err.without_url())
}

#[async_trait]
impl CustomerDirectory for ShopifyAdminClient {
    async fn search_customer_by_email(
        &self,
        shop: &ShopDomain,
        email: &str,
    ) -> Result<Option<Customer>, AdminApiError> {
        self.search_customer(shop, email).await
    }

    async fn fetch_metafields(
        &self,
        shop: &ShopDomain,
        customer_id: i64,
    ) -> Result<Vec<Metafield>, AdminApiError> {
        self.customer_metafields(shop, customer_id).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
