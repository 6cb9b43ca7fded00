//! User role types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Account role, fixed at registration.
///
/// Wire format in storage: `u8` (0 = Mentee, 1 = Mentor, 2 = Admin).
/// JSON format: `"MENTEE"`, `"MENTOR"`, `"ADMIN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Mentee = 0,
    Mentor = 1,
    Admin = 2,
}

impl Role {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Mentee),
            1 => Some(Self::Mentor),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mentee => "MENTEE",
            Self::Mentor => "MENTOR",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MENTEE" => Ok(Self::Mentee),
            "MENTOR" => Ok(Self::Mentor),
            "ADMIN" => Ok(Self::Admin),
            other => Err(DomainError::UnknownRole(other.to_owned())),
        }
    }
}

/// Kind of mentor; selects which mentor sub-profile applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentorType {
    Professor,
    Alumni,
    PeerGroup,
}
