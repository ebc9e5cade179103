//! Error types for the inspection core.
//!
//! Only boundary work (payload decoding, config loading) can fail hard. Data
//! contract problems inside a decoded payload are reported as
//! [`crate::validate::ContractViolation`] values instead.

use thiserror::Error;

/// Root error type for fallible boundary operations.
#[derive(Debug, Error)]
pub enum WeprError {
    /// Configuration could not be read, parsed, or validated.
    #[error("config error: {0}")]
    Config(String),

    /// Upstream response payload could not be decoded.
    #[error("payload error: {0}")]
    Payload(String),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WeprResult<T> = Result<T, WeprError>;

/// Precondition violations raised by the aggregate recomputation.
///
/// Callers are expected to gate on the projected view; hitting one of these
/// means a render surface asked for an aggregate it had no data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("running aggregate requested with no active metric set")]
    NoActiveSet,

    #[error("running aggregate requested on a metric set with no tokens")]
    EmptySet,

    #[error("cursor index {index} is outside a set of {len} tokens")]
    CursorOutOfRange { index: usize, len: usize },
}
