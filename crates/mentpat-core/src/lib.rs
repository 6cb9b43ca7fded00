//! HTTP plumbing shared by Mentpat services: response envelopes, health, request
//! ids, tracing and env configuration.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod response;
pub mod serde;
pub mod tracing;
