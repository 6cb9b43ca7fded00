//! Auth types shared by the Mentpat API and its tests.
//!
//! Provides JWT claims and validation, cookie builders, and the `Identity`
//! access-token extractor.

pub mod cookie;
pub mod identity;
pub mod token;
