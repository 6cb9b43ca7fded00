//! Mentor availability calendars.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::id::UserId;

/// Wall-clock time in `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 5 {
            return Err(DomainError::InvalidTimeOfDay(s.to_owned()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| DomainError::InvalidTimeOfDay(s.to_owned()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_booked: bool,
    pub booked_by: Option<UserId>,
}

impl TimeSlot {
    pub fn open(start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self, DomainError> {
        if end_time <= start_time {
            return Err(DomainError::InvalidTimeOfDay(format!(
                "{end_time} is not after {start_time}"
            )));
        }
        Ok(Self {
            start_time,
            end_time,
            is_booked: false,
            booked_by: None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    OneTime,
    #[default]
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub mentor_id: UserId,
    pub available_days: Vec<Weekday>,
    pub time_slots: Vec<TimeSlot>,
    /// IANA zone name, `UTC` by default.
    pub timezone: String,
    pub slot_duration_minutes: u32,
    pub recurrence: Recurrence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;
