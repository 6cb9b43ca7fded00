//! Payment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{PaymentId, SessionId, UserId};

/// What a payment is for. Session bookings always carry the payee and session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "paymentType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    #[serde(rename_all = "camelCase")]
    SessionBooking {
        payee: UserId,
        session_id: SessionId,
    },
    Subscription,
    Donation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    Upi,
    BankTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    #[default]
    NotRequested,
    Requested,
    Processing,
    Completed,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub payer: UserId,
    #[serde(flatten)]
    pub kind: PaymentKind,
    pub amount: f64,
    /// ISO 4217 code, `USD` unless stated otherwise.
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_gateway: String,
    pub refund_status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_CURRENCY: &str = "USD";
