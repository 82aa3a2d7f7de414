//! Response shaping for the matching endpoint.
//!
//! Bodies and header sets are plain data here; the HTTP layer only copies
//! them onto its responses.

mod cors;
mod types;

pub use cors::*;
pub use types::*;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// Headers for a successful JSON match: CORS echo, no caching, rendered
/// inline and never sniffed.
pub fn success_headers(origin: &AllowedOrigin) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        ("content-type", JSON_CONTENT_TYPE.to_string()),
        ("cache-control", NO_STORE.to_string()),
        ("content-disposition", "inline".to_string()),
        ("x-content-type-options", "nosniff".to_string()),
    ];
    headers.extend(cors_headers(origin));
    headers
}

/// Headers for an internal failure.
pub fn error_headers(origin: &AllowedOrigin) -> Vec<(&'static str, String)> {
    let mut headers = vec![("content-type", JSON_CONTENT_TYPE.to_string())];
    headers.extend(credential_headers(origin));
    headers
}

/// Where a navigating browser is sent: the page path with the normalized
/// name as its `name` query parameter.
pub fn redirect_location(page_path: &str, normalized_name: &str) -> String {
    format!(
        "{}?name={}",
        page_path,
        urlencoding::encode(normalized_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_headers_disable_caching_and_sniffing() {
        let headers = success_headers(&AllowedOrigin::Echo("https://example.com".to_string()));
        let get = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("cache-control").as_deref(), Some(NO_STORE));
        assert_eq!(get("content-disposition").as_deref(), Some("inline"));
        assert_eq!(get("x-content-type-options").as_deref(), Some("nosniff"));
        assert_eq!(
            get("access-control-allow-origin").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_error_headers_keep_origin_echo() {
        let headers = error_headers(&AllowedOrigin::Echo("https://a.test".to_string()));
        assert!(headers
            .iter()
            .any(|(n, v)| *n == "access-control-allow-origin" && v == "https://a.test"));
        assert!(headers
            .iter()
            .any(|(n, v)| *n == "access-control-allow-credentials" && v == "true"));
    }

    #[test]
    fn test_redirect_location_encodes_name() {
        assert_eq!(redirect_location("/animals", "Ada"), "/animals?name=Ada");
        assert_eq!(
            redirect_location("/animals", "Mary Jane & co"),
            "/animals?name=Mary%20Jane%20%26%20co"
        );
    }
}
