//! Request headers for the directory API
//!
//! The listing endpoint serves a browser frontend and expects matching
//! origin/referer headers; requests without them are rejected upstream.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

/// The fixed header set sent with every page request
pub fn default_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("accept", "application/json, text/plain, */*"),
        ("accept-language", "en-US,en;q=0.9"),
        ("origin", "https://www.narpm.org"),
        ("referer", "https://www.narpm.org/"),
        ("user-agent", USER_AGENT),
    ]
}

/// Build a reqwest header map from the default set
pub fn header_map() -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in default_headers() {
        // Both sides are static, well-formed ASCII
        map.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_complete() {
        let headers = default_headers();
        assert_eq!(headers.len(), 5);
        assert!(headers.iter().any(|(name, _)| *name == "origin"));
        assert!(headers.iter().any(|(name, _)| *name == "user-agent"));
    }

    #[test]
    fn test_header_map_builds() {
        let map = header_map();
        assert_eq!(map.len(), 5);
        assert_eq!(
            map.get("accept").and_then(|v| v.to_str().ok()),
            Some("application/json, text/plain, */*")
        );
    }
}
