pub mod animals;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use std::collections::HashMap;

/// Request headers keyed by lowercased name. Non-UTF-8 values are skipped.
pub(crate) fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_lowercase(), v.to_string()))
        })
        .collect()
}

/// Copy a prepared header set onto a response, replacing existing values.
pub(crate) fn with_headers(mut response: Response, headers: Vec<(&'static str, String)>) -> Response {
    for (name, value) in headers {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(name), value);
            }
            Err(_) => tracing::warn!(header = name, "Dropping header with invalid value"),
        }
    }
    response
}
