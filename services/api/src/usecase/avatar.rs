use mentpat_domain::id::UserId;

use crate::domain::repository::{MediaStore, UserRepository};
use crate::domain::types::{UploadedFile, User};
use crate::error::ApiServiceError;

pub struct UpdateAvatarUseCase<U: UserRepository, M: MediaStore> {
    pub users: U,
    pub media: M,
}

impl<U: UserRepository, M: MediaStore> UpdateAvatarUseCase<U, M> {
    pub async fn execute(
        &self,
        user_id: UserId,
        file: Option<UploadedFile>,
    ) -> Result<User, ApiServiceError> {
        let file = file
            .filter(|f| !f.bytes.is_empty())
            .ok_or(ApiServiceError::MissingAvatar)?;

        let url = self
            .media
            .upload(file)
            .await?
            .ok_or(ApiServiceError::AvatarUploadFailed)?;

        self.users
            .update_avatar(user_id, &url)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}
