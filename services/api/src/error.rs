use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mentpat_core::error::error_response;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error("all fields are required, including otp")]
    MissingFields,
    #[error("provide exactly one of username or email")]
    MissingCredentials,
    #[error("password is required")]
    MissingPassword,
    #[error("email is required")]
    MissingEmail,
    #[error("username is required")]
    MissingUsername,
    #[error("old and new password are required")]
    MissingPasswords,
    #[error("role must be MENTOR, MENTEE or ADMIN")]
    InvalidRole,
    #[error("invalid request body")]
    InvalidPayload,
    #[error("invalid value for {0}")]
    InvalidField(String),
    #[error("invalid or expired otp")]
    InvalidOtp,
    #[error("old password is incorrect")]
    IncorrectPassword,
    #[error("avatar file is missing")]
    MissingAvatar,
    #[error("error while uploading avatar")]
    AvatarUploadFailed,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized request")]
    MissingRefreshToken,
    #[error("refresh token is expired or invalid")]
    InvalidRefreshToken,
    #[error("user not found")]
    UserNotFound,
    #[error("user with this email or username already exists")]
    UserAlreadyExists,
    #[error("username already taken")]
    UsernameTaken,
    #[error("failed to send verification email")]
    MailDeliveryFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::MissingPassword => "MISSING_PASSWORD",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::MissingUsername => "MISSING_USERNAME",
            Self::MissingPasswords => "MISSING_PASSWORDS",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::InvalidOtp => "INVALID_OTP",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",
            Self::MissingAvatar => "MISSING_AVATAR",
            Self::AvatarUploadFailed => "AVATAR_UPLOAD_FAILED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::MailDeliveryFailed => "MAIL_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields
            | Self::MissingCredentials
            | Self::MissingPassword
            | Self::MissingEmail
            | Self::MissingUsername
            | Self::MissingPasswords
            | Self::InvalidRole
            | Self::InvalidPayload
            | Self::InvalidField(_)
            | Self::InvalidOtp
            | Self::IncorrectPassword
            | Self::MissingAvatar
            | Self::AvatarUploadFailed => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::MissingRefreshToken | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::MailDeliveryFailed | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiServiceError {
    fn from(_: JsonRejection) -> Self {
        Self::InvalidPayload
    }
}

impl From<QueryRejection> for ApiServiceError {
    fn from(_: QueryRejection) -> Self {
        Self::InvalidPayload
    }
}

impl From<MultipartRejection> for ApiServiceError {
    fn from(_: MultipartRejection) -> Self {
        Self::InvalidPayload
    }
}

impl From<MultipartError> for ApiServiceError {
    fn from(_: MultipartError) -> Self {
        Self::InvalidPayload
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        // Client errors are already visible in the TraceLayer request line.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            Self::MailDeliveryFailed => {
                tracing::error!(kind = "MAIL_DELIVERY_FAILED", "otp mail delivery failed");
            }
            _ => {}
        }
        error_response(self.status(), self.kind(), &self.to_string())
    }
}
