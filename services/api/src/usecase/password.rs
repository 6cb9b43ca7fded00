use anyhow::Context as _;

use mentpat_domain::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::ApiServiceError;

/// bcrypt work factor for stored passwords.
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password on the blocking pool.
pub async fn hash_password(plain: &str) -> Result<String, ApiServiceError> {
    let plain = plain.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plain, BCRYPT_COST))
        .await
        .context("join password hash task")?
        .context("hash password")?;
    Ok(hash)
}

/// Compare a plaintext password with a stored bcrypt hash on the blocking pool.
pub async fn verify_password(plain: &str, hash: &str) -> Result<bool, ApiServiceError> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .context("join password verify task")?
        .context("verify password")?;
    Ok(matches)
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: ChangePasswordInput,
    ) -> Result<(), ApiServiceError> {
        let (Some(old_password), Some(new_password)) = (
            input.old_password.filter(|p| !p.is_empty()),
            input.new_password.filter(|p| !p.is_empty()),
        ) else {
            return Err(ApiServiceError::MissingPasswords);
        };

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;

        if !verify_password(&old_password, &user.password_hash).await? {
            return Err(ApiServiceError::IncorrectPassword);
        }

        let hash = hash_password(&new_password).await?;
        self.users.update_password(user.id, &hash).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }
}
