//! Access-token extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::CookieJar;
use http::header::AUTHORIZATION;
use http::request::Parts;

use mentpat_domain::id::UserId;
use mentpat_domain::user::Role;

use crate::cookie::ACCESS_TOKEN_COOKIE;
use crate::token::{AuthError, TokenKeys, validate_access_token};

/// Caller identity proven by a valid access token.
///
/// The token is read from the `accessToken` cookie, falling back to an
/// `Authorization: Bearer` header. Rejects with a 401 envelope.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub role: Role,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AuthError;

    // Resolve synchronously and hand back a 'static future; `async fn` here
    // would capture the borrowed parts and break the trait's Send bound.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
            .or_else(|| bearer_token(parts));

        let result = match token {
            None => Err(AuthError::Missing),
            Some(token) => validate_access_token(&token, &TokenKeys::from_ref(state)),
        };

        async move {
            let claims = result?;
            Ok(Self {
                user_id: claims.sub,
                email: claims.email,
                username: claims.username,
                role: claims.role,
            })
        }
    }
}
