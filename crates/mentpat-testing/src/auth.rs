//! Mock auth helpers for integration tests.
//!
//! `MockAuth` mints real access tokens with fixed test secrets, so handlers
//! exercise the same `Identity` extractor they use in production.

use axum::http::{HeaderMap, HeaderValue, header};
use uuid::Uuid;

use mentpat_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use mentpat_auth_types::token::{AccessSubject, TokenKeys, issue_access_token};
use mentpat_domain::id::UserId;
use mentpat_domain::user::Role;

/// Token keys shared by every test in the workspace.
pub fn test_keys() -> TokenKeys {
    TokenKeys {
        access_secret: "test-access-secret".to_owned(),
        refresh_secret: "test-refresh-secret".to_owned(),
        access_ttl: 3600,
        refresh_ttl: 7200,
    }
}

/// Configurable identity encoded into test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl MockAuth {
    pub fn new(user_id: UserId, role: Role) -> Self {
        let short = user_id.0.simple().to_string()[..8].to_owned();
        Self {
            user_id,
            email: format!("{short}@example.com"),
            username: short,
            role,
        }
    }

    /// Random mentee identity.
    pub fn mentee() -> Self {
        Self::new(UserId(Uuid::now_v7()), Role::Mentee)
    }

    /// Signed access token for this identity.
    pub fn access_token(&self) -> String {
        issue_access_token(
            &AccessSubject {
                user_id: self.user_id,
                email: &self.email,
                username: &self.username,
                full_name: "Test User",
                role: self.role,
            },
            &test_keys(),
        )
        .expect("sign test token")
    }

    /// Headers carrying the token as an `accessToken` cookie.
    pub fn cookie_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{ACCESS_TOKEN_COOKIE}={}", self.access_token()))
                .unwrap(),
        );
        map
    }

    /// Headers carrying the token as `Authorization: Bearer`.
    pub fn bearer_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.access_token())).unwrap(),
        );
        map
    }
}
