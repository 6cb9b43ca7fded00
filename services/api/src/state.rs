use std::future::Future;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use mentpat_auth_types::token::TokenKeys;

use crate::domain::repository::{Mailer, MediaStore, OtpRepository, UserRepository};
use crate::infra::db::{DbOtpRepository, DbUserRepository};
use crate::infra::mail::SmtpMailer;
use crate::infra::media::CloudinaryMediaStore;

/// Storage and outbound services the handlers run against.
pub trait Backend: Clone + Send + Sync + 'static {
    type Users: UserRepository;
    type Otps: OtpRepository;
    type Mailer: Mailer;
    type Media: MediaStore;

    fn users(&self) -> Self::Users;
    fn otps(&self) -> Self::Otps;
    fn mailer(&self) -> Self::Mailer;
    fn media(&self) -> Self::Media;

    /// Readiness of the backing storage.
    fn ready(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Postgres, SMTP and Cloudinary.
#[derive(Clone)]
pub struct DbBackend {
    pub db: DatabaseConnection,
    pub mailer: SmtpMailer,
    pub media: CloudinaryMediaStore,
}

impl Backend for DbBackend {
    type Users = DbUserRepository;
    type Otps = DbOtpRepository;
    type Mailer = SmtpMailer;
    type Media = CloudinaryMediaStore;

    fn users(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    fn otps(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }

    fn media(&self) -> CloudinaryMediaStore {
        self.media.clone()
    }

    async fn ready(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState<B = DbBackend> {
    pub backend: B,
    pub keys: TokenKeys,
}

impl<B: Backend> AppState<B> {
    pub fn user_repo(&self) -> B::Users {
        self.backend.users()
    }

    pub fn otp_repo(&self) -> B::Otps {
        self.backend.otps()
    }

    pub fn mailer(&self) -> B::Mailer {
        self.backend.mailer()
    }

    pub fn media(&self) -> B::Media {
        self.backend.media()
    }
}

impl<B> FromRef<AppState<B>> for TokenKeys {
    fn from_ref(state: &AppState<B>) -> Self {
        state.keys.clone()
    }
}
