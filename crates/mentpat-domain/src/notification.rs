//! In-app and email notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{MessageId, NotificationId, PaymentId, SessionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    SessionBooked,
    SessionCancelled,
    SessionReminder,
    PaymentSuccess,
    PaymentFailed,
    NewMessage,
    MentorRecommendation,
    SystemAlert,
}

/// The record a notification points at.
///
/// Serialized as `{"referenceModel": "Sessions", "referenceId": "<uuid>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "referenceModel", content = "referenceId")]
pub enum NotificationReference {
    #[serde(rename = "Sessions")]
    Session(SessionId),
    #[serde(rename = "Payments")]
    Payment(PaymentId),
    #[serde(rename = "Messages")]
    Message(MessageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    #[default]
    InApp,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(flatten)]
    pub reference: Option<NotificationReference>,
    pub is_read: bool,
    pub delivery_method: DeliveryMethod,
    pub created_at: DateTime<Utc>,
}
