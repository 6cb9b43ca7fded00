//! Domain types shared across Mentpat crates.
//!
//! Pure types with no framework dependencies. Only `user` and `profile` back
//! live endpoints today; the remaining modules describe records the platform
//! stores for sessions, payments, messaging and moderation.

pub mod analytics;
pub mod availability;
pub mod error;
pub mod id;
pub mod messaging;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod report;
pub mod resource;
pub mod session;
pub mod user;
