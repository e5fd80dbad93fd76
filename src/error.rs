use thiserror::Error;

/// sub-causes for a rejected TargetSet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetsError {
    #[error("two targets name the same power")]
    RepeatedPower,
    #[error("egg target was given a type")]
    TypedEgg,
    #[error("sparkling was requested without title")]
    SparklingWithoutTitle,
    #[error("sparkling requires every non-egg target to share one type")]
    SparklingTypeMismatch,
    #[error("a non-egg target has no type")]
    UntypedNonEgg,
    #[error("three same-typed non-egg targets are unreachable without sparkling")]
    UnreachableTypeSharing,
    #[error("expected 1 to 3 targets, got {0}")]
    TargetCountOutOfRange(usize),
}

/// crate-wide error taxonomy
#[derive(Debug, Error)]
pub enum PicnicError {
    #[error("unknown power: {0}")]
    UnknownPower(String),
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("malformed target string: {0}")]
    MalformedTargetString(String),
    #[error("invalid targets: {0}")]
    InvalidTargets(#[from] TargetsError),
    #[error("invalid probability: {value}")]
    InvalidProbability { value: f64 },
    #[error("invalid filling bounds: min {min} > max {max}")]
    InvalidFillingBounds { min: u8, max: u8 },
    #[error("invalid player count: {0}")]
    InvalidPlayerCount(u8),
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, PicnicError>;
