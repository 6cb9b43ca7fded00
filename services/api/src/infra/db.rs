use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use mentpat_api_schema::{otps, users};
use mentpat_domain::id::UserId;
use mentpat_domain::user::Role;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::{Otp, User};
use crate::error::ApiServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl DbUserRepository {
    async fn find_one(&self, filter: Condition, what: &'static str) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find()
            .filter(filter)
            .one(&self.db)
            .await
            .context(what)?;
        Ok(model.map(user_from_model).transpose()?)
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiServiceError> {
        self.find_one(
            Condition::all().add(users::Column::Username.eq(username)),
            "find user by username",
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        self.find_one(
            Condition::all().add(users::Column::Email.eq(email)),
            "find user by email",
        )
        .await
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, ApiServiceError> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .count(&self.db)
            .await
            .context("check username or email taken")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), ApiServiceError> {
        let active = users::ActiveModel {
            id: Set(user.id.0),
            full_name: Set(user.full_name.clone()),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            avatar: Set(user.avatar.clone()),
            role: Set(user.role.as_u8() as i16),
            college: Set(user.college.clone()),
            domain_of_interest: Set(to_json(&user.domain_of_interest)?),
            expertise_domains: Set(to_json(&user.expertise_domains)?),
            mentorship_categories: Set(to_json(&user.mentorship_categories)?),
            mentor_details: Set(user.mentor_details.as_ref().map(to_json).transpose()?),
            mentee_details: Set(user.mentee_details.as_ref().map(to_json).transpose()?),
            admin_details: Set(user.admin_details.as_ref().map(to_json).transpose()?),
            refresh_token: Set(user.refresh_token.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };
        match active.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn set_refresh_token(
        &self,
        id: UserId,
        token: Option<&str>,
    ) -> Result<(), ApiServiceError> {
        users::Entity::update_many()
            .col_expr(
                users::Column::RefreshToken,
                Expr::value(token.map(str::to_owned)),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set refresh token")?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), ApiServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update password")?;
        Ok(())
    }

    async fn update_avatar(&self, id: UserId, url: &str) -> Result<Option<User>, ApiServiceError> {
        let result = users::ActiveModel {
            id: Set(id.0),
            avatar: Set(Some(url.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(user_from_model(model)?)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update avatar").into()),
        }
    }

    async fn save_profile(&self, user: &User) -> Result<(), ApiServiceError> {
        let active = users::ActiveModel {
            id: Set(user.id.0),
            full_name: Set(user.full_name.clone()),
            username: Set(user.username.clone()),
            college: Set(user.college.clone()),
            domain_of_interest: Set(to_json(&user.domain_of_interest)?),
            expertise_domains: Set(to_json(&user.expertise_domains)?),
            mentorship_categories: Set(to_json(&user.mentorship_categories)?),
            mentor_details: Set(user.mentor_details.as_ref().map(to_json).transpose()?),
            mentee_details: Set(user.mentee_details.as_ref().map(to_json).transpose()?),
            admin_details: Set(user.admin_details.as_ref().map(to_json).transpose()?),
            updated_at: Set(user.updated_at),
            ..Default::default()
        };
        match active.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiServiceError::UserNotFound),
            Err(e) if is_unique_violation(&e) => Err(ApiServiceError::UsernameTaken),
            Err(e) => Err(anyhow::Error::new(e).context("save profile").into()),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<serde_json::Value> {
    serde_json::to_value(value).context("encode profile column")
}

fn from_json<T: DeserializeOwned>(value: serde_json::Value, column: &'static str) -> anyhow::Result<T> {
    serde_json::from_value(value).with_context(|| format!("decode users.{column}"))
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(Role::from_u8)
        .with_context(|| format!("unknown role value {}", model.role))?;
    Ok(User {
        id: UserId(model.id),
        full_name: model.full_name,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        avatar: model.avatar,
        role,
        college: model.college,
        domain_of_interest: from_json(model.domain_of_interest, "domain_of_interest")?,
        expertise_domains: from_json(model.expertise_domains, "expertise_domains")?,
        mentorship_categories: from_json(model.mentorship_categories, "mentorship_categories")?,
        mentor_details: model
            .mentor_details
            .map(|v| from_json(v, "mentor_details"))
            .transpose()?,
        mentee_details: model
            .mentee_details
            .map(|v| from_json(v, "mentee_details"))
            .transpose()?,
        admin_details: model
            .admin_details
            .map(|v| from_json(v, "admin_details"))
            .transpose()?,
        refresh_token: model.refresh_token,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn code_in_use(&self, code: &str) -> Result<bool, ApiServiceError> {
        let count = otps::Entity::find()
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::ExpiresAt.gt(Utc::now()))
            .count(&self.db)
            .await
            .context("check otp code in use")?;
        Ok(count > 0)
    }

    async fn create(&self, otp: &Otp) -> Result<(), ApiServiceError> {
        otps::ActiveModel {
            id: Set(otp.id),
            email: Set(otp.email.clone()),
            code: Set(otp.code.clone()),
            created_at: Set(otp.created_at),
            expires_at: Set(otp.expires_at),
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(())
    }

    async fn find_active(&self, email: &str, code: &str) -> Result<Option<Otp>, ApiServiceError> {
        let model = otps::Entity::find()
            .filter(otps::Column::Email.eq(email))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .context("find active otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, ApiServiceError> {
        let result = otps::Entity::delete_many()
            .filter(otps::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("delete otps by email")?;
        Ok(result.rows_affected)
    }

    async fn purge_expired(&self) -> Result<u64, ApiServiceError> {
        let result = otps::Entity::delete_many()
            .filter(otps::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .context("purge expired otps")?;
        Ok(result.rows_affected)
    }
}

fn otp_from_model(model: otps::Model) -> Otp {
    Otp {
        id: model.id,
        email: model.email,
        code: model.code,
        created_at: model.created_at,
        expires_at: model.expires_at,
    }
}
