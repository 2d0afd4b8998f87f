//! Request bodies and the extractors that validate them.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::memory::types::MemoryDraft;

/// Body of `POST /memories` and `PUT /memories/{id}`.
///
/// `isPublic` is optional and follows [`parse_loose_bool`]. Updates replace
/// every field, so leaving it out of a `PUT` makes the memory private again.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryBody {
    pub content: String,
    pub cover_url: String,
    #[serde(default, deserialize_with = "deserialize_loose_bool")]
    pub is_public: bool,
}

impl From<MemoryBody> for MemoryDraft {
    fn from(body: MemoryBody) -> Self {
        MemoryDraft {
            content: body.content,
            cover_url: body.cover_url,
            is_public: body.is_public,
        }
    }
}

/// Interpret a loosely typed JSON value as a boolean.
///
/// - `true` / `false`
/// - `null` → `false`
/// - numbers `1` / `0`
/// - strings, trimmed and case-insensitive: `"true"`, `"1"`, `"yes"`, `"on"` → `true`;
///   `"false"`, `"0"`, `"no"`, `"off"`, `""` → `false`
///
/// Anything else is rejected.
pub fn parse_loose_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Ok(true),
            Some(x) if x == 0.0 => Ok(false),
            _ => Err(format!("expected 0 or 1, got {n}")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(format!("not a boolean: {other:?}")),
        },
        other => Err(format!("expected a boolean, got {other}")),
    }
}

fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_loose_bool(&value).map_err(serde::de::Error::custom)
}

/// Validate a `{id}` path segment as a UUID. Returns the canonical
/// lowercase hyphenated form used as the primary key.
pub fn parse_memory_id(raw: &str) -> Result<String, ApiError> {
    Uuid::parse_str(raw)
        .map(|id| id.hyphenated().to_string())
        .map_err(|e| ApiError::Validation(format!("invalid memory id {raw:?}: {e}")))
}

/// `Json` extractor whose rejections become [`ApiError::Validation`], so malformed
/// bodies get the same error shape as every other client error.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// `Path` extractor whose rejections (e.g. a segment that is not valid UTF-8)
/// become [`ApiError::Validation`].
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Result<MemoryBody, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn is_public_defaults_to_false() {
        let parsed = body(json!({"content": "hello", "coverUrl": "http://x/y.png"})).unwrap();
        assert!(!parsed.is_public);
    }

    #[test]
    fn is_public_accepts_loose_forms() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("TRUE"), true),
            (json!(" yes "), true),
            (json!("on"), true),
            (json!(1), true),
            (json!("1"), true),
            (json!(false), false),
            (json!("off"), false),
            (json!(0), false),
            (json!(""), false),
            (json!(null), false),
        ] {
            let parsed = body(json!({"content": "c", "coverUrl": "u", "isPublic": raw.clone()}))
                .unwrap_or_else(|e| panic!("{raw} should parse: {e}"));
            assert_eq!(parsed.is_public, expected, "isPublic = {raw}");
        }
    }

    #[test]
    fn is_public_rejects_garbage() {
        for raw in [json!("maybe"), json!(2), json!([]), json!({})] {
            assert!(
                body(json!({"content": "c", "coverUrl": "u", "isPublic": raw.clone()})).is_err(),
                "isPublic = {raw} should be rejected"
            );
        }
    }

    #[test]
    fn required_fields_are_enforced() {
        assert!(body(json!({"coverUrl": "u"})).is_err());
        assert!(body(json!({"content": "c"})).is_err());
        assert!(body(json!({"content": 5, "coverUrl": "u"})).is_err());
    }

    #[test]
    fn memory_id_must_be_uuid() {
        assert!(parse_memory_id("not-a-uuid").is_err());
        assert!(parse_memory_id("").is_err());

        let id = parse_memory_id("0C7F3C4E-3B0C-4A52-9C43-4B6D3C0B1F10").unwrap();
        assert_eq!(id, "0c7f3c4e-3b0c-4a52-9c43-4b6d3c0b1f10");
    }
}
