use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use custmeta_admin::{lookup_customer, LookupOutcome};
use custmeta_core::ShopDomain;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState, LookupResponse};

#[derive(Debug, Deserialize)]
pub(super) struct CustomerQuery {
    pub shop: Option<String>,
    pub email: Option<String>,
}

/// `GET /api/customer?shop=<host>&email=<address>`
pub(super) async fn get_customer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<CustomerQuery>, QueryRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let (shop, email) = match query {
        Ok(Query(q)) => (non_empty(q.shop), non_empty(q.email)),
        Err(rejection) => {
            tracing::debug!(request_id = %req_id.0, error = %rejection, "unparseable query string");
            (None, None)
        }
    };
    let (Some(shop), Some(email)) = (shop, email) else {
        tracing::debug!(request_id = %req_id.0, "missing shop or email");
        return Err(ApiError::missing_params());
    };

    let shop = ShopDomain::parse(&shop).map_err(|e| {
        tracing::debug!(request_id = %req_id.0, error = %e, "rejected shop parameter");
        ApiError::invalid_shop()
    })?;

    match lookup_customer(state.directory.as_ref(), &shop, &email).await {
        Ok(LookupOutcome::Found {
            customer,
            metafields,
        }) => Ok(Json(LookupResponse::found(customer, metafields))),
        Ok(LookupOutcome::NotFound) => {
            tracing::info!(request_id = %req_id.0, %shop, "no customer matched email");
            Ok(Json(LookupResponse::not_found()))
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, %shop, error = %e, "customer lookup failed");
            Err(ApiError::server_error())
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
