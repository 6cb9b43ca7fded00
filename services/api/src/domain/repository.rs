use std::future::Future;

use mentpat_domain::id::UserId;

use crate::domain::types::{Otp, UploadedFile, User};
use crate::error::ApiServiceError;

// Futures are declared `Send` so handlers stay generic over the backend.

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, ApiServiceError>> + Send;

    /// Lookup by normalized username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, ApiServiceError>> + Send;

    /// Lookup by normalized email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, ApiServiceError>> + Send;

    /// Whether any account uses the username or the email.
    fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> impl Future<Output = Result<bool, ApiServiceError>> + Send;

    /// Insert a new user. A unique-index violation yields `UserAlreadyExists`.
    fn create(&self, user: &User) -> impl Future<Output = Result<(), ApiServiceError>> + Send;

    /// Overwrite (or clear) the single refresh-token slot.
    fn set_refresh_token(
        &self,
        id: UserId,
        token: Option<&str>,
    ) -> impl Future<Output = Result<(), ApiServiceError>> + Send;

    fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), ApiServiceError>> + Send;

    /// Set the avatar URL and return the updated user, `None` if the user is gone.
    fn update_avatar(
        &self,
        id: UserId,
        url: &str,
    ) -> impl Future<Output = Result<Option<User>, ApiServiceError>> + Send;

    /// Persist editable profile fields. A username collision yields `UsernameTaken`.
    fn save_profile(&self, user: &User)
    -> impl Future<Output = Result<(), ApiServiceError>> + Send;
}

/// Repository for registration OTPs. Reads only ever see unexpired rows.
pub trait OtpRepository: Send + Sync {
    /// Whether any unexpired OTP, for any email, uses `code`.
    fn code_in_use(&self, code: &str)
    -> impl Future<Output = Result<bool, ApiServiceError>> + Send;

    fn create(&self, otp: &Otp) -> impl Future<Output = Result<(), ApiServiceError>> + Send;

    /// Unexpired OTP matching both email and code exactly.
    fn find_active(
        &self,
        email: &str,
        code: &str,
    ) -> impl Future<Output = Result<Option<Otp>, ApiServiceError>> + Send;

    /// Delete every OTP for `email`. Returns the number removed.
    fn delete_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<u64, ApiServiceError>> + Send;

    /// Delete expired rows. Returns the number removed.
    fn purge_expired(&self) -> impl Future<Output = Result<u64, ApiServiceError>> + Send;
}

/// Port for outbound verification mail.
pub trait Mailer: Send + Sync {
    /// Fails with `MailDeliveryFailed` when the message cannot be delivered.
    fn send_otp(
        &self,
        email: &str,
        code: &str,
    ) -> impl Future<Output = Result<(), ApiServiceError>> + Send;
}

/// Port for hosted media uploads.
pub trait MediaStore: Send + Sync {
    /// Upload a file, returning its public URL. `Ok(None)` means the store
    /// accepted the request but produced no URL.
    fn upload(
        &self,
        file: UploadedFile,
    ) -> impl Future<Output = Result<Option<String>, ApiServiceError>> + Send;
}
