//! Mentoring session records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{SessionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    OneOnOne,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Pending,
    Cancelled,
    Completed,
    Rescheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// A mentee's 1–5 star rating of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRating {
    mentee_rating: u8,
    mentee_feedback: Option<String>,
}

impl SessionRating {
    pub fn new(rating: u8, feedback: Option<String>) -> Result<Self, DomainError> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::OutOfRange {
                field: "menteeRating",
                min: 1,
                max: 5,
            });
        }
        Ok(Self {
            mentee_rating: rating,
            mentee_feedback: feedback,
        })
    }

    pub fn rating(&self) -> u8 {
        self.mentee_rating
    }

    pub fn feedback(&self) -> Option<&str> {
        self.mentee_feedback.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleDetails {
    pub previous_date: NaiveDate,
    pub previous_time: String,
    pub rescheduled_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: u32,
    pub meeting_link: String,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub notes: String,
    pub payment_status: SessionPaymentStatus,
    pub rating: Option<SessionRating>,
    pub reschedule_details: Option<RescheduleDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
