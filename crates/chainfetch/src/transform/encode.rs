use serde_json::{Map, Value};

use crate::data::RequestOptions;
use crate::data::options::{BODY, HEADERS, JSON_BODY};
use crate::error::Result;

/// Content type set on requests whose body came from `json_body`.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Turn a `json_body` entry into a transport-ready body.
///
/// When `json_body` is present the result is a copy of `options` with
/// `body` set to the JSON text, `Content-Type` set to [`JSON_CONTENT_TYPE`]
/// (any existing content type header is replaced, other headers are kept) and
/// `json_body` removed. Otherwise `options` is returned without any `null`
/// `json_body` entry.
///
/// # Errors
///
/// Returns [`Error::Encoding`](crate::Error::Encoding) if the value cannot be
/// written as JSON text.
pub fn encode_json_body(options: &RequestOptions) -> Result<RequestOptions> {
    let Some(json_body) = options.json_body() else {
        let mut options = options.clone();
        options.remove(JSON_BODY);
        return Ok(options);
    };

    let body = serde_json::to_string(json_body)?;

    let mut headers = match options.get(HEADERS) {
        Some(Value::Object(headers)) => headers.clone(),
        _ => Map::new(),
    };
    headers.retain(|name, _| !name.eq_ignore_ascii_case("content-type"));
    headers.insert(
        "Content-Type".to_string(),
        Value::String(JSON_CONTENT_TYPE.to_string()),
    );

    let mut encoded = options.clone();
    encoded.remove(JSON_BODY);
    encoded.insert(BODY, Value::String(body));
    encoded.insert(HEADERS, Value::Object(headers));
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_sets_body_and_content_type() {
        let options = RequestOptions::new()
            .with_method("POST")
            .with_json_body(&json!({ "a": 1 }))
            .unwrap();

        let encoded = encode_json_body(&options).unwrap();

        assert_eq!(encoded.body(), Some(r#"{"a":1}"#));
        assert_eq!(encoded.header("Content-Type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(encoded.method(), Some("POST"));
        assert!(!encoded.contains(JSON_BODY));
    }

    #[test]
    fn test_encode_keeps_other_headers() {
        let options = RequestOptions::new()
            .with_header("Authorization", "Bearer t")
            .with_header("content-type", "text/plain")
            .with_json_body(&json!([1, 2]))
            .unwrap();

        let encoded = encode_json_body(&options).unwrap();
        let headers = encoded.headers().unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(encoded.header("Authorization"), Some("Bearer t"));
        assert_eq!(
            headers.get("Content-Type"),
            Some(&json!(JSON_CONTENT_TYPE))
        );
    }

    #[test]
    fn test_encode_without_json_body_is_identity() {
        let options = RequestOptions::new()
            .with_method("PUT")
            .with_body("raw");

        assert_eq!(encode_json_body(&options).unwrap(), options);
    }

    #[test]
    fn test_encode_does_not_touch_input() {
        let options = RequestOptions::new()
            .with_header("Accept", "*/*")
            .with_json_body(&json!({ "a": 1 }))
            .unwrap();

        let _ = encode_json_body(&options).unwrap();

        assert!(options.contains(JSON_BODY));
        assert_eq!(options.header("Content-Type"), None);
    }

    #[test]
    fn test_encode_string_body() {
        let options = RequestOptions::new()
            .with_json_body("hello")
            .unwrap();

        let encoded = encode_json_body(&options).unwrap();

        assert_eq!(encoded.body(), Some(r#""hello""#));
    }

    #[test]
    fn test_encode_drops_null_json_body() {
        let options = RequestOptions::new()
            .with_method("GET")
            .with_entry(JSON_BODY, Value::Null);

        let encoded = encode_json_body(&options).unwrap();

        assert!(!encoded.contains(JSON_BODY));
        assert_eq!(encoded.body(), None);
        assert_eq!(encoded.header("Content-Type"), None);
        assert_eq!(encoded.method(), Some("GET"));
    }
}
