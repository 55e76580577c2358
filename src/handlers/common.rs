use crate::errors::ServiceError;
use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response with a `Location` header
pub fn created_response<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// True when the request declares a JSON body. Media type parameters such as
/// `charset` are ignored.
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Parses a body that must be sent as JSON; other media types get 415
pub fn require_json(headers: &HeaderMap, body: &Bytes) -> Result<Value, ServiceError> {
    if !has_json_content_type(headers) {
        return Err(ServiceError::UnsupportedMediaType(format!(
            "Content-Type must be {}",
            JSON_CONTENT_TYPE
        )));
    }
    parse_json(body)
}

/// Parses a body that should be JSON; anything else is an invalid payload
pub fn json_payload(headers: &HeaderMap, body: &Bytes) -> Result<Value, ServiceError> {
    if !has_json_content_type(headers) {
        return Err(ServiceError::ValidationError(
            "Request payload must be in JSON format".to_string(),
        ));
    }
    parse_json(body)
}

fn parse_json(body: &Bytes) -> Result<Value, ServiceError> {
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::ValidationError(format!("Invalid JSON payload: {}", e)))
}

/// Path ids that are not integers cannot name an item
pub fn parse_item_id(raw: &str) -> Result<i32, ServiceError> {
    raw.parse::<i32>()
        .map_err(|_| ServiceError::NotFound(format!("Inventory item not found (id {})", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    #[test]
    fn json_content_type_allows_parameters() {
        assert!(has_json_content_type(&headers(Some("application/json"))));
        assert!(has_json_content_type(&headers(Some(
            "application/json; charset=utf-8"
        ))));
        assert!(!has_json_content_type(&headers(Some("text/plain"))));
        assert!(!has_json_content_type(&headers(None)));
    }

    #[test]
    fn require_json_rejects_other_media_types() {
        let body = Bytes::from_static(b"{}");
        assert_matches!(
            require_json(&headers(None), &body),
            Err(ServiceError::UnsupportedMediaType(_))
        );
        assert_matches!(
            require_json(&headers(Some("text/html")), &body),
            Err(ServiceError::UnsupportedMediaType(_))
        );
        assert!(require_json(&headers(Some("application/json")), &body).is_ok());
    }

    #[test]
    fn json_payload_treats_other_media_types_as_invalid() {
        let body = Bytes::from_static(b"not json");
        assert_matches!(
            json_payload(&headers(Some("text/plain")), &body),
            Err(ServiceError::ValidationError(_))
        );
        assert_matches!(
            json_payload(&headers(Some("application/json")), &body),
            Err(ServiceError::ValidationError(msg)) if msg.starts_with("Invalid JSON payload")
        );
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_item_id("12").unwrap(), 12);
        assert_matches!(parse_item_id("abc"), Err(ServiceError::NotFound(_)));
    }
}
