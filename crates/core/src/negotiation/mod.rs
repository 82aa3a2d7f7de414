//! Decide whether a caller wants JSON or should be sent to the interactive
//! page.
//!
//! The decision is a pure function over [`RequestSignals`], so it can be
//! exercised without an HTTP server.

use std::collections::HashMap;

/// The header and query values that drive content negotiation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignals {
    /// `Accept` header
    pub accept: Option<String>,
    /// `Sec-Fetch-Mode` header
    pub fetch_mode: Option<String>,
    /// `X-Requested-With` header
    pub requested_with: Option<String>,
    /// `format` query parameter
    pub format: Option<String>,
    /// `json` query parameter
    pub json: Option<String>,
}

impl RequestSignals {
    /// Extract signals from lowercased header names and raw query parameters.
    pub fn from_parts(headers: &HashMap<String, String>, query: &HashMap<String, String>) -> Self {
        Self {
            accept: headers.get("accept").cloned(),
            fetch_mode: headers.get("sec-fetch-mode").cloned(),
            requested_with: headers.get("x-requested-with").cloned(),
            format: query.get("format").cloned(),
            json: query.get("json").cloned(),
        }
    }

    /// `format=json` or `json=true` in the query.
    pub fn explicit_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
            || self
                .json
                .as_deref()
                .is_some_and(|j| j.eq_ignore_ascii_case("true"))
    }

    pub fn accepts_json(&self) -> bool {
        self.accept_contains("application/json")
    }

    pub fn prefers_html(&self) -> bool {
        self.accept_contains("text/html")
    }

    /// Cross-origin fetch mode or an AJAX marker.
    pub fn is_programmatic(&self) -> bool {
        self.fetch_mode
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("cors"))
            || self
                .requested_with
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("XMLHttpRequest"))
    }

    fn accept_contains(&self, media_type: &str) -> bool {
        self.accept
            .as_deref()
            .is_some_and(|a| a.to_ascii_lowercase().contains(media_type))
    }
}

/// How the matching endpoint should answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub wants_json: bool,
    pub wants_redirect: bool,
}

impl Classification {
    const JSON: Self = Self {
        wants_json: true,
        wants_redirect: false,
    };

    const REDIRECT: Self = Self {
        wants_json: false,
        wants_redirect: true,
    };
}

/// Classify a call. First matching rule wins:
///
/// 1. explicit JSON query flag
/// 2. `Accept` allows JSON
/// 3. programmatic fetch (cors mode, AJAX marker)
/// 4. `Accept` prefers HTML: redirect to the page
/// 5. anything else is treated as JSON
pub fn classify(signals: &RequestSignals) -> Classification {
    if signals.explicit_json() || signals.accepts_json() || signals.is_programmatic() {
        return Classification::JSON;
    }
    if signals.prefers_html() {
        return Classification::REDIRECT;
    }
    Classification::JSON
}
