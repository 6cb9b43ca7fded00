//! Direct messages between users, grouped into conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ConversationId, MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: Vec<UserId>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message payload: text inline, images and files by hosted URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageContent {
    Text {
        #[serde(rename = "messageContent")]
        text: String,
    },
    Image {
        #[serde(rename = "mediaUrl")]
        media_url: String,
    },
    File {
        #[serde(rename = "mediaUrl")]
        media_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    #[serde(flatten)]
    pub content: MessageContent,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
