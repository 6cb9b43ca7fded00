use chrono::Utc;
use uuid::Uuid;

use mentpat_domain::id::UserId;
use mentpat_domain::profile::{AdminDetails, MenteeDetails, MentorDetails};
use mentpat_domain::user::Role;

use crate::domain::repository::{MediaStore, OtpRepository, UserRepository};
use crate::domain::types::{UploadedFile, User, normalize_identifier};
use crate::error::ApiServiceError;
use crate::usecase::password::hash_password;

// ── Register ─────────────────────────────────────────────────────────────────

/// Raw registration form. Every text field is required and non-blank.
#[derive(Default)]
pub struct RegisterInput {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub college: Option<String>,
    pub otp: Option<String>,
    pub avatar: Option<UploadedFile>,
}

struct RegisterFields {
    full_name: String,
    username: String,
    email: String,
    password: String,
    role: Role,
    college: String,
    otp: String,
}

impl RegisterInput {
    fn validate(&self) -> Result<RegisterFields, ApiServiceError> {
        fn required(v: &Option<String>) -> Result<String, ApiServiceError> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .ok_or(ApiServiceError::MissingFields)
        }

        let full_name = required(&self.full_name)?;
        let username = normalize_identifier(&required(&self.username)?);
        let email = normalize_identifier(&required(&self.email)?);
        // Blank check only; the password is hashed exactly as typed.
        let password = self
            .password
            .clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or(ApiServiceError::MissingFields)?;
        let role = required(&self.role)?;
        let college = required(&self.college)?;
        let otp = required(&self.otp)?;
        let role = role
            .parse::<Role>()
            .map_err(|_| ApiServiceError::InvalidRole)?;

        Ok(RegisterFields {
            full_name,
            username,
            email,
            password,
            role,
            college,
            otp,
        })
    }
}

pub struct RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MediaStore,
{
    pub users: U,
    pub otps: O,
    pub media: M,
}

impl<U, O, M> RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MediaStore,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiServiceError> {
        let fields = input.validate()?;

        self.otps
            .find_active(&fields.email, &fields.otp)
            .await?
            .ok_or(ApiServiceError::InvalidOtp)?;

        // Single use: burn every code issued to this email.
        self.otps.delete_by_email(&fields.email).await?;

        if self
            .users
            .exists_by_username_or_email(&fields.username, &fields.email)
            .await?
        {
            return Err(ApiServiceError::UserAlreadyExists);
        }

        // An empty file part counts as no avatar.
        let avatar = match input.avatar.filter(|f| !f.bytes.is_empty()) {
            Some(file) => Some(
                self.media
                    .upload(file)
                    .await?
                    .ok_or(ApiServiceError::AvatarUploadFailed)?,
            ),
            None => None,
        };

        let password_hash = hash_password(&fields.password).await?;
        let now = Utc::now();
        let role = fields.role;
        let user = User {
            id: UserId(Uuid::now_v7()),
            full_name: fields.full_name,
            username: fields.username,
            email: fields.email,
            password_hash,
            avatar,
            role,
            college: Some(fields.college),
            domain_of_interest: vec![],
            expertise_domains: vec![],
            mentorship_categories: vec![],
            mentor_details: (role == Role::Mentor).then(MentorDetails::default),
            mentee_details: (role == Role::Mentee).then(MenteeDetails::default),
            admin_details: (role == Role::Admin).then(AdminDetails::default),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }
}

// ── CheckUsername ────────────────────────────────────────────────────────────

pub struct CheckUsernameUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CheckUsernameUseCase<U> {
    /// `true` when no account uses the case-folded username.
    pub async fn execute(&self, username: Option<String>) -> Result<bool, ApiServiceError> {
        let username = username
            .map(|u| normalize_identifier(&u))
            .filter(|u| !u.is_empty())
            .ok_or(ApiServiceError::MissingUsername)?;
        Ok(self.users.find_by_username(&username).await?.is_none())
    }
}
