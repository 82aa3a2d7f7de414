//! Cross-origin framing for credentialed callers.
//!
//! Credentialed responses cannot use a wildcard allowed origin, so the
//! request's own origin is echoed back whenever it can be worked out.

use std::collections::HashMap;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str =
    "Content-Type, Accept, Authorization, X-Requested-With, X-Payment, X-Retry-Attempt";
pub const PREFLIGHT_MAX_AGE_SECS: u64 = 86_400;

const DEFAULT_FORWARDED_PROTO: &str = "https";

/// Request headers that carry origin information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginHints {
    pub origin: Option<String>,
    pub referer: Option<String>,
    pub host: Option<String>,
    pub forwarded_proto: Option<String>,
}

impl OriginHints {
    /// Extract hints from lowercased header names.
    pub fn from_headers(headers: &HashMap<String, String>) -> Self {
        Self {
            origin: headers.get("origin").cloned(),
            referer: headers.get("referer").cloned(),
            host: headers.get("host").cloned(),
            forwarded_proto: headers.get("x-forwarded-proto").cloned(),
        }
    }
}

/// Value for `Access-Control-Allow-Origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    /// Echo this exact origin
    Echo(String),
    /// `*`, only when nothing identifies the caller
    Any,
}

impl AllowedOrigin {
    pub fn header_value(&self) -> &str {
        match self {
            AllowedOrigin::Echo(origin) => origin,
            AllowedOrigin::Any => "*",
        }
    }
}

/// Resolve the origin to echo: `Origin`, then the scheme and authority of
/// `Referer`, then `<x-forwarded-proto|https>://<host>`, then wildcard.
pub fn resolve_origin(hints: &OriginHints) -> AllowedOrigin {
    if let Some(origin) = non_empty(hints.origin.as_deref()) {
        return AllowedOrigin::Echo(origin.to_string());
    }

    if let Some(origin) = non_empty(hints.referer.as_deref()).and_then(origin_from_referer) {
        return AllowedOrigin::Echo(origin);
    }

    if let Some(host) = non_empty(hints.host.as_deref()) {
        let proto = non_empty(hints.forwarded_proto.as_deref())
            // Proxies may append a list; the first hop is the client's
            .and_then(|p| p.split(',').next())
            .map(str::trim)
            .unwrap_or(DEFAULT_FORWARDED_PROTO);
        return AllowedOrigin::Echo(format!("{}://{}", proto, host));
    }

    AllowedOrigin::Any
}

/// `https://example.com/page?x=1` -> `https://example.com`
fn origin_from_referer(referer: &str) -> Option<String> {
    let (scheme, rest) = referer.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    if scheme.is_empty() || authority.is_empty() {
        return None;
    }
    Some(format!("{}://{}", scheme, authority))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Allowed-origin plus credentials: the minimum for any credentialed reply.
pub fn credential_headers(origin: &AllowedOrigin) -> Vec<(&'static str, String)> {
    vec![
        (
            "access-control-allow-origin",
            origin.header_value().to_string(),
        ),
        ("access-control-allow-credentials", "true".to_string()),
    ]
}

/// Full CORS capability set sent with successful responses and pre-flights.
pub fn cors_headers(origin: &AllowedOrigin) -> Vec<(&'static str, String)> {
    let mut headers = credential_headers(origin);
    headers.push(("access-control-allow-methods", ALLOWED_METHODS.to_string()));
    headers.push(("access-control-allow-headers", ALLOWED_HEADERS.to_string()));
    headers
}

/// Headers answering an `OPTIONS` pre-flight.
pub fn preflight_headers(origin: &AllowedOrigin) -> Vec<(&'static str, String)> {
    let mut headers = cors_headers(origin);
    headers.push((
        "access-control-max-age",
        PREFLIGHT_MAX_AGE_SECS.to_string(),
    ));
    headers
}
