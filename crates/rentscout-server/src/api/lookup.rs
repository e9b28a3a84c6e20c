use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rentscout_pipeline::Survey;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_lookup_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LookupQuery {
    pub q: Option<String>,
}

impl LookupQuery {
    /// The `q` parameter, if present and not blank.
    pub(super) fn text(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}

fn missing_query(request_id: String) -> ApiError {
    ApiError::new(request_id, "bad_request", "missing query parameter q")
}

pub(super) async fn lookup_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<Survey>>, ApiError> {
    let listing_url = query.text().ok_or_else(|| missing_query(req_id.0.clone()))?;

    let survey = state
        .scout
        .lookup_ad_url(listing_url)
        .await
        .map_err(|e| map_lookup_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: survey,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn lookup_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ApiResponse<Survey>>, ApiError> {
    let address = query.text().ok_or_else(|| missing_query(req_id.0.clone()))?;

    let survey = state
        .scout
        .lookup_address(address)
        .await
        .map_err(|e| map_lookup_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: survey,
        meta: ResponseMeta::new(req_id.0),
    }))
}
