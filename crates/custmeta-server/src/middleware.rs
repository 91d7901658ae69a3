use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use custmeta_core::CorsPolicy;
use uuid::Uuid;

use crate::api::ApiError;

/// Request ID stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Extracts `x-request-id` from the request or generates a `UUIDv4`.
///
/// The ID is inserted into request extensions as [`RequestId`] and echoed on
/// the response as the `x-request-id` header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Rejects cross-origin requests whose `Origin` is not allowed by the policy.
///
/// Requests without an `Origin` header (same-origin navigation, curl,
/// server-to-server) always pass. Preflight `OPTIONS` requests are subject
/// to the same check.
pub async fn enforce_cors_policy(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(origin) = req.headers().get(ORIGIN).cloned() else {
        return next.run(req).await;
    };

    let allowed = origin.to_str().is_ok_and(|o| policy.allows(o));
    if allowed {
        return next.run(req).await;
    }

    tracing::warn!(origin = ?origin, path = %req.uri().path(), "origin rejected by CORS policy");
    ApiError::forbidden_origin().into_response()
}
