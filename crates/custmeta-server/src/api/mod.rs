mod customer;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use custmeta_admin::CustomerDirectory;
use custmeta_core::{CorsPolicy, Customer, MetafieldMap};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{enforce_cors_policy, request_id};

const MISSING_PARAMS: &str = "Missing shop or email";
const INVALID_SHOP: &str = "Invalid shop domain";
const NO_CUSTOMER: &str = "No customer found";
const SERVER_ERROR: &str = "Server error";
const ORIGIN_NOT_ALLOWED: &str = "Not allowed by CORS";

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn CustomerDirectory>,
}

/// Body of every `/api/customer` response.
///
/// Failures carry only `success` and `message`; a match carries `customer`
/// and `metafields` and no `message`.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafields: Option<MetafieldMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl LookupResponse {
    fn found(customer: Customer, metafields: MetafieldMap) -> Self {
        Self {
            success: true,
            customer: Some(customer),
            metafields: Some(metafields),
            message: None,
        }
    }

    fn not_found() -> Self {
        Self::failure(NO_CUSTOMER)
    }

    fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            customer: None,
            metafields: None,
            message: Some(message),
        }
    }
}

/// A failed request: status code plus a fixed, caller-safe message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn missing_params() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MISSING_PARAMS,
        }
    }

    fn invalid_shop() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: INVALID_SHOP,
        }
    }

    fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: SERVER_ERROR,
        }
    }

    pub(crate) fn forbidden_origin() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: ORIGIN_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(LookupResponse::failure(self.message))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors(policy: &CorsPolicy) -> CorsLayer {
    let origin = match policy {
        CorsPolicy::AllowAll => AllowOrigin::any(),
        CorsPolicy::AllowList(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        ),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_app(state: AppState, cors_policy: CorsPolicy) -> Router {
    let cors = build_cors(&cors_policy);

    Router::new()
        .route("/api/customer", get(customer::get_customer))
        .route("/api/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn_with_state(
                    Arc::new(cors_policy),
                    enforce_cors_policy,
                ))
                .layer(cors),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
