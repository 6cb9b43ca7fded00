use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::{MAX_OTP_ATTEMPTS, OTP_LEN, OTP_TTL_SECS, Otp, normalize_identifier};
use crate::error::ApiServiceError;

/// Random decimal code of `OTP_LEN` digits. Leading zeros are kept.
pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

pub struct SendOtpInput {
    pub email: Option<String>,
}

pub struct SendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> SendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<(), ApiServiceError> {
        let email = input
            .email
            .map(|e| normalize_identifier(&e))
            .filter(|e| !e.is_empty())
            .ok_or(ApiServiceError::MissingEmail)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiServiceError::UserAlreadyExists);
        }

        let code = self.unique_code().await?;

        // Mail first: an undelivered code is never stored.
        self.mailer.send_otp(&email, &code).await?;

        let now = Utc::now();
        let otp = Otp {
            id: Uuid::now_v7(),
            email,
            code,
            created_at: now,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
        };
        self.otps.create(&otp).await?;
        tracing::info!(otp_id = %otp.id, "otp issued");
        Ok(())
    }

    async fn unique_code(&self) -> Result<String, ApiServiceError> {
        for _ in 0..MAX_OTP_ATTEMPTS {
            let code = generate_otp();
            if !self.otps.code_in_use(&code).await? {
                return Ok(code);
            }
        }
        Err(anyhow::anyhow!("no free otp after {MAX_OTP_ATTEMPTS} attempts").into())
    }
}
