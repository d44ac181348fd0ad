//! Error types for the CEC codec and follower.

use thiserror::Error;

/// Errors raised while decoding, building or processing CEC messages.
///
/// A [FeatureAbort](crate::Command::FeatureAbort) reply is regular protocol
/// output and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CecError {
    /// The input text was empty or only whitespace.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// The input text could not be parsed.
    #[error("malformed input `{input}`: {reason}")]
    Malformed { input: String, reason: String },

    /// A parameter is out of range or has the wrong shape.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The device is not in a state that allows the operation.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// The operation belongs to a device role this crate does not implement.
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl CecError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        CecError::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        CecError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for CEC operations.
pub type CecResult<T> = Result<T, CecError>;
