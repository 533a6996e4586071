use axum::http::HeaderMap;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Per-request key override sent by the caller, if any.
pub fn api_key_override(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_api_key_override() {
        let mut headers = HeaderMap::new();
        assert_eq!(api_key_override(&headers), None);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(api_key_override(&headers).as_deref(), Some("abc"));
    }
}
