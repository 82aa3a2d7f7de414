//! The matching endpoint.
//!
//! `GET` reads the name from the query and may redirect navigating browsers
//! to the interactive page; `POST` reads it from a JSON body and always
//! answers with JSON; `OPTIONS` answers pre-flights without matching.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

use spirit_core::matcher::{normalize_name, ANONYMOUS_NAME};
use spirit_core::negotiation::{classify, RequestSignals};
use spirit_core::response::{
    error_headers, preflight_headers, redirect_location, resolve_origin, success_headers,
    AllowedOrigin, AnimalResponse, ErrorBody, OriginHints,
};

use super::{header_map, with_headers};
use crate::metrics::REDIRECTS_TOTAL;
use crate::state::AppState;

pub async fn get_animal(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let headers = header_map(&headers);
    let raw_name = query
        .get("name")
        .map(String::as_str)
        .unwrap_or(ANONYMOUS_NAME);

    let classification = classify(&RequestSignals::from_parts(&headers, &query));
    if classification.wants_redirect {
        let location = redirect_location(
            &state.config().server.page_path,
            &normalize_name(raw_name),
        );
        REDIRECTS_TOTAL.inc();
        debug!(location = %location, "Redirecting navigation to interactive page");
        return Redirect::temporary(&location).into_response();
    }

    let origin = resolve_origin(&OriginHints::from_headers(&headers));
    match_response(&state, raw_name, &origin)
}

pub async fn post_animal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let headers = header_map(&headers);
    let origin = resolve_origin(&OriginHints::from_headers(&headers));
    let raw_name = name_from_body(&body);
    match_response(&state, &raw_name, &origin)
}

pub async fn preflight(headers: HeaderMap) -> Response {
    let origin = resolve_origin(&OriginHints::from_headers(&header_map(&headers)));
    with_headers(StatusCode::OK.into_response(), preflight_headers(&origin))
}

/// The `name` field of a JSON body. Anything unusable becomes the anonymous
/// name rather than a failed call.
fn name_from_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(ANONYMOUS_NAME)
            .to_string(),
        Err(e) => {
            debug!(error = %e, "Unparseable request body, matching as anonymous");
            ANONYMOUS_NAME.to_string()
        }
    }
}

fn match_response(state: &AppState, raw_name: &str, origin: &AllowedOrigin) -> Response {
    let dataset = state.dataset();
    match state.matcher().find_match(raw_name, dataset.records()) {
        Ok(result) => {
            let body = AnimalResponse::from_match(result, dataset.len());
            with_headers(
                (StatusCode::OK, Json(body)).into_response(),
                success_headers(origin),
            )
        }
        Err(e) => {
            error!(error = %e, "Error finding animal");
            let body = ErrorBody::new("Failed to fetch animal", e.to_string());
            with_headers(
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response(),
                error_headers(origin),
            )
        }
    }
}
