use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use mentpat_auth_types::identity::Identity;
use mentpat_core::response::ApiResponse;
use mentpat_core::serde::to_rfc3339_ms;
use mentpat_domain::id::UserId;
use mentpat_domain::profile::{AdminDetails, MenteeDetails, MentorDetails, MentorshipCategory};
use mentpat_domain::user::Role;

use crate::domain::types::User;
use crate::error::ApiServiceError;
use crate::state::{AppState, Backend};
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileUseCase};

/// Public view of a user. Never carries the password hash or refresh token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub college: Option<String>,
    pub domain_of_interest: Vec<String>,
    pub expertise_domains: Vec<String>,
    pub mentorship_categories: Vec<MentorshipCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_details: Option<MentorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentee_details: Option<MenteeDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_details: Option<AdminDetails>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            role: user.role,
            college: user.college,
            domain_of_interest: user.domain_of_interest,
            expertise_domains: user.expertise_domains,
            mentorship_categories: user.mentorship_categories,
            mentor_details: user.mentor_details,
            mentee_details: user.mentee_details,
            admin_details: user.admin_details,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users/getUser ────────────────────────────────────────────────────────

pub async fn get_user<B: Backend>(
    State(state): State<AppState<B>>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "User profile fetched successfully",
    ))
}

// ── PATCH /users/update-account-details ───────────────────────────────────────

pub async fn update_account_details<B: Backend>(
    State(state): State<AppState<B>>,
    identity: Identity,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let Json(patch) = body?;
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id, patch).await?;
    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Profile updated successfully",
    ))
}
