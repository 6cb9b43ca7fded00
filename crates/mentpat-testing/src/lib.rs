//! Test utilities for Mentpat crates.
//!
//! Token minting for authenticated requests and response-body helpers.
//! Import from tests only, never from production code.

pub mod auth;
pub mod response;
