use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentpat_domain::id::UserId;
use mentpat_domain::profile::{AdminDetails, MenteeDetails, MentorDetails, MentorshipCategory};
use mentpat_domain::user::Role;

/// Stored user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    /// Trimmed and lower-cased.
    pub username: String,
    /// Trimmed and lower-cased.
    pub email: String,
    /// bcrypt hash, never the plaintext.
    pub password_hash: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub college: Option<String>,
    pub domain_of_interest: Vec<String>,
    pub expertise_domains: Vec<String>,
    pub mentorship_categories: Vec<MentorshipCategory>,
    pub mentor_details: Option<MentorDetails>,
    pub mentee_details: Option<MenteeDetails>,
    pub admin_details: Option<AdminDetails>,
    /// The only refresh token currently accepted for this user.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration one-time password.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Otp {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// A file part received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// OTP length in decimal digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Give up generating an OTP after this many collisions with live codes.
pub const MAX_OTP_ATTEMPTS: usize = 20;

/// Trim and lower-case a username or email for storage and lookup.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}
