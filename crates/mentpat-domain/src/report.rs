//! Moderation reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ReportId, ResourceId, SessionId, UserId};

/// What is being reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reportType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportTarget {
    #[serde(rename_all = "camelCase")]
    User { reported_user: UserId },
    #[serde(rename_all = "camelCase")]
    Session { reported_session: SessionId },
    #[serde(rename_all = "camelCase")]
    Resource { reported_resource: ResourceId },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Escalated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub reported_by: UserId,
    #[serde(flatten)]
    pub target: ReportTarget,
    pub description: String,
    pub evidence: Vec<String>,
    pub status: ReportStatus,
    pub assigned_admin: Option<UserId>,
    pub resolution_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
