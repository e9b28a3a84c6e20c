use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use rentscout_pipeline::{LookupError, Survey};

use crate::views::{error_page, result_page, search_page};

use super::lookup::LookupQuery;
use super::{log_lookup_error, lookup_status, AppState};

pub(super) async fn index() -> Html<String> {
    Html(search_page())
}

pub(super) async fn ad_page(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    let Some(listing_url) = query.text() else {
        return Redirect::to("/").into_response();
    };
    render(state.scout.lookup_ad_url(listing_url).await)
}

pub(super) async fn address_page(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    let Some(address) = query.text() else {
        return Redirect::to("/").into_response();
    };
    render(state.scout.lookup_address(address).await)
}

fn render(outcome: Result<Survey, LookupError>) -> Response {
    match outcome {
        Ok(survey) => Html(result_page(&survey)).into_response(),
        Err(e) => {
            log_lookup_error(&e);
            (lookup_status(&e), Html(error_page(&e.user_message()))).into_response()
        }
    }
}
