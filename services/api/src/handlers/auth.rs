use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, Query, State,
        multipart::{Field, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use axum_extra::extract::{CookieJar, cookie::SameSite};
use serde::{Deserialize, Serialize};

use mentpat_auth_types::{
    cookie::{REFRESH_TOKEN_COOKIE, clear_token_cookies, set_token_cookies},
    identity::Identity,
};
use mentpat_core::response::{ApiResponse, Empty};

use crate::domain::types::UploadedFile;
use crate::error::ApiServiceError;
use crate::handlers::user::UserResponse;
use crate::state::{AppState, Backend};
use crate::usecase::avatar::UpdateAvatarUseCase;
use crate::usecase::otp::{SendOtpInput, SendOtpUseCase};
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::usecase::register::{CheckUsernameUseCase, RegisterInput, RegisterUseCase};
use crate::usecase::token::{LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase};

async fn read_file(field: Field<'_>) -> Result<UploadedFile, ApiServiceError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);
    let bytes = field.bytes().await?;
    Ok(UploadedFile {
        file_name,
        content_type,
        bytes,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenBody {
    access_token: String,
    refresh_token: String,
}

// ── POST /auth/send-otp ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

pub async fn send_otp<B: Backend>(
    State(state): State<AppState<B>>,
    body: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let Json(body) = body?;
    let usecase = SendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(SendOtpInput { email: body.email }).await?;
    Ok(ApiResponse::created(Empty::default(), "OTP sent successfully"))
}

// ── GET /auth/check-username ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckUsernameQuery {
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct CheckUsernameResponse {
    pub success: bool,
    pub available: bool,
    pub message: &'static str,
}

pub async fn check_username<B: Backend>(
    State(state): State<AppState<B>>,
    query: Result<Query<CheckUsernameQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let Query(query) = query?;
    let usecase = CheckUsernameUseCase {
        users: state.user_repo(),
    };
    let available = usecase.execute(query.username).await?;
    Ok(Json(CheckUsernameResponse {
        success: true,
        available,
        message: if available {
            "Username is available"
        } else {
            "Username already taken"
        },
    }))
}

// ── POST /auth/register ───────────────────────────────────────────────────────

pub async fn register<B: Backend>(
    State(state): State<AppState<B>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let mut multipart = multipart?;
    let mut input = RegisterInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "avatar" => input.avatar = Some(read_file(field).await?),
            // No cover field on the user; drain and drop.
            "coverImage" => {
                field.bytes().await?;
            }
            "fullName" => input.full_name = Some(field.text().await?),
            "username" => input.username = Some(field.text().await?),
            "email" => input.email = Some(field.text().await?),
            "password" => input.password = Some(field.text().await?),
            "role" => input.role = Some(field.text().await?),
            "college" => input.college = Some(field.text().await?),
            "otp" => input.otp = Some(field.text().await?),
            _ => {}
        }
    }

    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        media: state.media(),
    };
    let user = usecase.execute(input).await?;
    Ok(ApiResponse::created(
        UserResponse::from(user),
        "Registration done successfully",
    ))
}

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn login<B: Backend>(
    State(state): State<AppState<B>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let Json(body) = body?;
    let usecase = LoginUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_token_cookies(
        jar,
        out.tokens.access_token.clone(),
        out.tokens.refresh_token.clone(),
        Some(SameSite::None),
    );
    let body = LoginResponse {
        user: UserResponse::from(out.user),
        access_token: out.tokens.access_token,
        refresh_token: out.tokens.refresh_token,
    };
    Ok((jar, ApiResponse::ok(body, "User logged in successfully")))
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout<B: Backend>(
    State(state): State<AppState<B>>,
    identity: Identity,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = LogoutUseCase {
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id).await?;
    Ok((
        clear_token_cookies(jar),
        ApiResponse::ok(Empty::default(), "User logged out"),
    ))
}

// ── POST /auth/refresh-token ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest {
    refresh_token: Option<String>,
}

pub async fn refresh_token<B: Backend>(
    State(state): State<AppState<B>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, ApiServiceError> {
    // Cookie wins; the body is only consulted when no cookie was sent.
    let presented = match jar.get(REFRESH_TOKEN_COOKIE) {
        Some(cookie) => Some(cookie.value().to_owned()),
        None => serde_json::from_slice::<RefreshTokenRequest>(&body)
            .ok()
            .and_then(|b| b.refresh_token),
    };

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let tokens = usecase.execute(presented.as_deref()).await?;

    let jar = set_token_cookies(
        jar,
        tokens.access_token.clone(),
        tokens.refresh_token.clone(),
        None,
    );
    let body = TokenBody {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };
    Ok((jar, ApiResponse::ok(body, "Access Token refreshed successfully")))
}

// ── POST /auth/change-password ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn change_password<B: Backend>(
    State(state): State<AppState<B>>,
    identity: Identity,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let Json(body) = body?;
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                old_password: body.old_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(ApiResponse::ok(Empty::default(), "Password changed successfully"))
}

// ── PATCH /auth/avatar ────────────────────────────────────────────────────────

pub async fn update_avatar<B: Backend>(
    State(state): State<AppState<B>>,
    identity: Identity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let mut multipart = multipart?;
    let mut avatar = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("avatar") {
            avatar = Some(read_file(field).await?);
        }
    }

    let usecase = UpdateAvatarUseCase {
        users: state.user_repo(),
        media: state.media(),
    };
    let user = usecase.execute(identity.user_id, avatar).await?;
    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Avatar successfully updated",
    ))
}
