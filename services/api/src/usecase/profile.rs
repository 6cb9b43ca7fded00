use chrono::Utc;
use serde_json::{Map, Value};

use mentpat_domain::id::UserId;

use crate::domain::profile::{apply_patch, scope_for, strip_restricted};
use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, ApiServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: UserId,
        mut patch: Map<String, Value>,
    ) -> Result<User, ApiServiceError> {
        strip_restricted(&mut patch);

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        let previous_username = user.username.clone();

        let scope = scope_for(&user, &patch)?;
        apply_patch(&mut user, scope, &patch)?;

        if user.username != previous_username {
            let taken = self
                .users
                .find_by_username(&user.username)
                .await?
                .is_some_and(|other| other.id != user.id);
            if taken {
                return Err(ApiServiceError::UsernameTaken);
            }
        }

        user.updated_at = Utc::now();
        self.users.save_profile(&user).await?;
        Ok(user)
    }
}
