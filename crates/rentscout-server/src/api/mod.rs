mod lookup;
mod pages;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use rentscout_pipeline::{LookupError, Scout};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub scout: Arc<Scout>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "invalid_ad_url" | "ad_not_found" | "address_not_found" => {
                StatusCode::BAD_REQUEST
            }
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// HTTP status for a failed lookup: the not-found classes are the caller's
/// input, everything else is an upstream failure.
pub(super) fn lookup_status(error: &LookupError) -> StatusCode {
    if error.is_not_found() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// Logs the failure at the level its class deserves.
pub(super) fn log_lookup_error(error: &LookupError) {
    if error.is_not_found() {
        tracing::info!(error = %error, "lookup found nothing");
    } else {
        tracing::error!(error = %error, "lookup failed upstream");
    }
}

pub(super) fn map_lookup_error(request_id: String, error: &LookupError) -> ApiError {
    log_lookup_error(error);
    let code = match error {
        LookupError::InvalidAdUrl => "invalid_ad_url",
        LookupError::AdNotFound => "ad_not_found",
        LookupError::AddressNotFound => "address_not_found",
        LookupError::Upstream(_) => "upstream_error",
    };
    ApiError::new(request_id, code, error.user_message())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/ad", get(pages::ad_page))
        .route("/address", get(pages::address_page));

    let api_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/ad", get(lookup::lookup_ad))
        .route("/api/v1/address", get(lookup::lookup_address));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
