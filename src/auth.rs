//! Bearer-token authentication.
//!
//! [`require_auth`] verifies the `Authorization: Bearer` header on every memory
//! route and stores the resulting [`Caller`] in the request extensions, where
//! handlers pick it up as an extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims. Only `sub` is needed to serve requests; the profile fields
/// travel along for clients that decode the token themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Caller identifier. Becomes the `userId` of memories the caller creates.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "avatarUrl", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated subject making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub sub: String,
}

/// HS256 signing and verification keys derived from the configured secret.
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode and validate a token (signature and expiry).
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| ApiError::Unauthenticated(format!("invalid token: {e}")))?;

        if data.claims.sub.trim().is_empty() {
            return Err(ApiError::Unauthenticated("token has an empty subject".into()));
        }
        Ok(data.claims)
    }

    /// Sign a token for `sub` that expires after `ttl_hours`.
    pub fn issue(
        &self,
        sub: &str,
        name: Option<String>,
        avatar_url: Option<String>,
        ttl_hours: u64,
    ) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: sub.to_string(),
            name,
            avatar_url,
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }
}

/// Authentication middleware. Rejects the request before any handler runs
/// unless it carries a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| ApiError::Unauthenticated("missing bearer token".into()))?;

    let claims = state.auth.verify(bearer.token()).inspect_err(|e| {
        tracing::debug!(path = %request.uri().path(), error = %e, "rejected token");
    })?;

    request.extensions_mut().insert(Caller { sub: claims.sub });
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("no authenticated caller".into()))
    }
}
