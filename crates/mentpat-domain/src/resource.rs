//! Learning resources shared by mentors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ResourceId, UserId};

/// Resource kind; uploaded media carry a file URL, links and courses an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    #[serde(rename_all = "camelCase")]
    Document { file_url: String },
    #[serde(rename_all = "camelCase")]
    Video { file_url: String },
    #[serde(rename_all = "camelCase")]
    Link { external_link: String },
    #[serde(rename_all = "camelCase")]
    Course { external_link: String },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    #[default]
    Public,
    Private,
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceComment {
    pub user_id: UserId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub uploaded_by: UserId,
    pub mentor_id: Option<UserId>,
    #[serde(flatten)]
    pub kind: ResourceKind,
    pub category: String,
    pub tags: Vec<String>,
    pub access_level: AccessLevel,
    pub views: u64,
    pub downloads: u64,
    pub likes: Vec<UserId>,
    pub comments: Vec<ResourceComment>,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
