//! Lenient JSON body extractor.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use serde_json::{Map, Value};

use crate::middleware::error::AppError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request body as a JSON object.
///
/// A body that is absent, not declared as JSON, or not an object yields an
/// empty map. Only a declared JSON body that fails to parse is rejected.
#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    fn parse(content_type: &str, bytes: &[u8]) -> Result<Self, AppError> {
        if content_type != JSON_CONTENT_TYPE || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::warn!("Rejected request body: {}", e);
                Err(AppError::BadRequest(e.to_string()))
            }
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl FromRequest for JsonObject {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req.content_type().to_ascii_lowercase();
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes.await?;
            Ok(Self::parse(&content_type, &bytes)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_or_untyped_body_is_empty_object() {
        assert!(JsonObject::parse("", b"").unwrap().0.is_empty());
        assert!(JsonObject::parse("application/json", b"  ").unwrap().0.is_empty());
        assert!(JsonObject::parse("text/plain", br#"{"title":"t"}"#).unwrap().0.is_empty());
        assert!(JsonObject::parse("application/json", b"[1,2]").unwrap().0.is_empty());
    }

    #[test]
    fn test_json_object_body() {
        let body = JsonObject::parse("application/json", br#"{"title":"t"}"#).unwrap();
        assert_eq!(body.0.get("title"), Some(&Value::from("t")));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = JsonObject::parse("application/json", b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
