//! Per-user engagement counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::UserId;
use crate::user::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementMetrics {
    pub login_count: u64,
    pub messages_sent: u64,
    pub resources_downloaded: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub user_id: UserId,
    pub user_type: Role,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub cancelled_sessions: u64,
    average_session_rating: f32,
    response_rate: f32,
    /// Mentors only.
    pub total_earnings: f64,
    /// Mentees only.
    pub total_spent: f64,
    pub engagement_metrics: EngagementMetrics,
    pub updated_at: DateTime<Utc>,
}

impl Analytics {
    pub fn new(user_id: UserId, user_type: Role, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            user_type,
            total_sessions: 0,
            completed_sessions: 0,
            cancelled_sessions: 0,
            average_session_rating: 0.0,
            response_rate: 0.0,
            total_earnings: 0.0,
            total_spent: 0.0,
            engagement_metrics: EngagementMetrics::default(),
            updated_at: now,
        }
    }

    pub fn average_session_rating(&self) -> f32 {
        self.average_session_rating
    }

    pub fn set_average_session_rating(&mut self, rating: f32) -> Result<(), DomainError> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(DomainError::OutOfRange {
                field: "averageSessionRating",
                min: 0,
                max: 5,
            });
        }
        self.average_session_rating = rating;
        Ok(())
    }

    /// Percentage of session requests accepted.
    pub fn response_rate(&self) -> f32 {
        self.response_rate
    }

    pub fn set_response_rate(&mut self, rate: f32) -> Result<(), DomainError> {
        if !(0.0..=100.0).contains(&rate) {
            return Err(DomainError::OutOfRange {
                field: "responseRate",
                min: 0,
                max: 100,
            });
        }
        self.response_rate = rate;
        Ok(())
    }
}
