//! sea-orm entities for the Mentpat API tables.

pub mod otps;
pub mod users;
