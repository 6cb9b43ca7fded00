use anyhow::Context as _;

use mentpat_auth_types::token::{
    AccessSubject, TokenKeys, issue_access_token, issue_refresh_token, validate_refresh_token,
};
use mentpat_domain::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, normalize_identifier};
use crate::error::ApiServiceError;
use crate::usecase::password::verify_password;

/// A freshly signed access/refresh pair.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign a new pair for `user` and make the refresh token the only valid one.
pub async fn rotate_tokens<U: UserRepository>(
    users: &U,
    user: &User,
    keys: &TokenKeys,
) -> Result<TokenPair, ApiServiceError> {
    let access_token = issue_access_token(
        &AccessSubject {
            user_id: user.id,
            email: &user.email,
            username: &user.username,
            full_name: &user.full_name,
            role: user.role,
        },
        keys,
    )
    .context("sign access token")?;
    let refresh_token = issue_refresh_token(user.id, keys).context("sign refresh token")?;

    users
        .set_refresh_token(user.id, Some(&refresh_token))
        .await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub tokens: TokenPair,
}

enum LoginKey {
    Username(String),
    Email(String),
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiServiceError> {
        let present = |v: Option<String>| {
            v.map(|s| normalize_identifier(&s))
                .filter(|s| !s.is_empty())
        };
        let key = match (present(input.username), present(input.email)) {
            (Some(username), None) => LoginKey::Username(username),
            (None, Some(email)) => LoginKey::Email(email),
            _ => return Err(ApiServiceError::MissingCredentials),
        };
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ApiServiceError::MissingPassword)?;

        let user = match &key {
            LoginKey::Username(username) => self.users.find_by_username(username).await?,
            LoginKey::Email(email) => self.users.find_by_email(email).await?,
        }
        .ok_or(ApiServiceError::UserNotFound)?;

        if !verify_password(&password, &user.password_hash).await? {
            return Err(ApiServiceError::InvalidCredentials);
        }

        let tokens = rotate_tokens(&self.users, &user, &self.keys).await?;
        tracing::info!(user_id = %user.id, "user logged in");

        let user = User {
            refresh_token: Some(tokens.refresh_token.clone()),
            ..user
        };
        Ok(LoginOutput { user, tokens })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Exchange the current refresh token for a new pair. The presented token
    /// stops working as soon as this succeeds.
    pub async fn execute(&self, presented: Option<&str>) -> Result<TokenPair, ApiServiceError> {
        let presented = presented
            .filter(|t| !t.is_empty())
            .ok_or(ApiServiceError::MissingRefreshToken)?;

        let claims = validate_refresh_token(presented, &self.keys)
            .map_err(|_| ApiServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(ApiServiceError::InvalidRefreshToken)?;

        if user.refresh_token.as_deref() != Some(presented) {
            return Err(ApiServiceError::InvalidRefreshToken);
        }

        let tokens = rotate_tokens(&self.users, &user, &self.keys).await?;
        tracing::info!(user_id = %user.id, "refresh token rotated");
        Ok(tokens)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> LogoutUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<(), ApiServiceError> {
        self.users.set_refresh_token(user_id, None).await?;
        tracing::info!(user_id = %user_id, "user logged out");
        Ok(())
    }
}
