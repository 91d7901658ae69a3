use thiserror::Error;

/// Errors returned by the Shopify Admin API client.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. `path` excludes the query
    /// string so the searched email never reaches the logs. `body` is
    /// truncated and only meant for server-side logs.
    #[error("unexpected HTTP status {status} from {path}: {body}")]
    UnexpectedStatus {
        status: u16,
        path: String,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Admin API URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
