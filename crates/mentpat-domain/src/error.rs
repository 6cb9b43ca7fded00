/// Validation failures raised by domain constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("invalid time of day: {0}")]
    InvalidTimeOfDay(String),
}
