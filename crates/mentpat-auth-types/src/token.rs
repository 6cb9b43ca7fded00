//! JWT access and refresh tokens.
//!
//! Access and refresh tokens are both HS256 but signed with separate secrets,
//! so one can never be replayed as the other.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;

use mentpat_core::error::error_response;
use mentpat_domain::id::UserId;
use mentpat_domain::user::Role;

/// Signing secrets and lifetimes for both token kinds.
#[derive(Clone)]
pub struct TokenKeys {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access-token lifetime in seconds.
    pub access_ttl: u64,
    /// Refresh-token lifetime in seconds.
    pub refresh_ttl: u64,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// Errors returned by token validation. Always rendered as 401.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("unauthorized request")]
    Missing,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "UNAUTHORIZED",
            Self::InvalidSignature | Self::Expired | Self::Malformed => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, self.kind(), &self.to_string())
    }
}

/// Access-token payload.
///
/// | Claim | Meaning |
/// |-------|---------|
/// | `sub` | user id |
/// | `email`, `username`, `fullName` | profile snapshot at issue time |
/// | `role` | `MENTOR` / `MENTEE` / `ADMIN` |
/// | `iat`, `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`issuer`** feature.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: UserId,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

/// Refresh-token payload. `jti` is random so two tokens minted in the same
/// second never compare equal.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct RefreshClaims {
    pub sub: UserId,
    pub jti: String,
    pub iat: u64,
    pub exp: u64,
}

// ── Decode (private) ─────────────────────────────────────────────────────

fn decode_jwt<T: serde::de::DeserializeOwned>(token: &str, secret: &str) -> Result<T, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<T>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access token against the access secret.
pub fn validate_access_token(token: &str, keys: &TokenKeys) -> Result<AccessClaims, AuthError> {
    decode_jwt(token, &keys.access_secret)
}

/// Validate a refresh token against the refresh secret.
///
/// Only proves the token is authentic and unexpired; callers must still compare
/// it with the value persisted on the user.
pub fn validate_refresh_token(token: &str, keys: &TokenKeys) -> Result<RefreshClaims, AuthError> {
    decode_jwt(token, &keys.refresh_secret)
}

// ── Issue (feature-gated) ────────────────────────────────────────────────

/// Profile fields embedded into an access token.
#[cfg(any(feature = "issuer", test))]
#[derive(Debug, Clone)]
pub struct AccessSubject<'a> {
    pub user_id: UserId,
    pub email: &'a str,
    pub username: &'a str,
    pub full_name: &'a str,
    pub role: Role,
}

#[cfg(any(feature = "issuer", test))]
fn encode_jwt<T: Serialize>(claims: &T, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Sign a fresh access token for `subject`.
#[cfg(any(feature = "issuer", test))]
pub fn issue_access_token(
    subject: &AccessSubject<'_>,
    keys: &TokenKeys,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = jsonwebtoken::get_current_timestamp();
    let claims = AccessClaims {
        sub: subject.user_id,
        email: subject.email.to_owned(),
        username: subject.username.to_owned(),
        full_name: subject.full_name.to_owned(),
        role: subject.role,
        iat,
        exp: iat + keys.access_ttl,
    };
    encode_jwt(&claims, &keys.access_secret)
}

/// Sign a fresh refresh token for `user_id`.
#[cfg(any(feature = "issuer", test))]
pub fn issue_refresh_token(
    user_id: UserId,
    keys: &TokenKeys,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = jsonwebtoken::get_current_timestamp();
    let claims = RefreshClaims {
        sub: user_id,
        jti: uuid::Uuid::new_v4().simple().to_string(),
        iat,
        exp: iat + keys.refresh_ttl,
    };
    encode_jwt(&claims, &keys.refresh_secret)
}
