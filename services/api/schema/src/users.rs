use sea_orm::entity::prelude::*;

/// User account. List and nested profile fields are stored as JSONB.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    /// 0 = mentee, 1 = mentor, 2 = admin.
    pub role: i16,
    pub college: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub domain_of_interest: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub expertise_domains: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub mentorship_categories: Json,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub mentor_details: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub mentee_details: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub admin_details: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub refresh_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
