//! Generator error types.

use crate::builder::BuildError;
use thiserror::Error;

/// A reference in a program that could not be turned into a live object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("State '{state}' uses unknown task '{kind}'")]
    UnknownTask { state: String, kind: String },

    #[error("State '{state}' uses unknown condition '{kind}'")]
    UnknownCondition { state: String, kind: String },

    #[error("State '{state}' references symbol #{symbol}, which is not in the table")]
    BadSymbol { state: String, symbol: u32 },

    #[error("State '{state}' references state #{index}, which is not in the program")]
    BadReference { state: String, index: u32 },

    #[error("Invalid parameters for '{kind}' in state '{state}': {reason}")]
    InvalidParams {
        state: String,
        kind: String,
        reason: String,
    },
}

/// Errors from compiling, encoding or instantiating a tree program.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The description text is not valid.
    #[error("Description parsing failed: {0}")]
    Parse(String),

    #[error("Program encoding failed: {0}")]
    Encode(String),

    #[error("Program decoding failed: {0}")]
    Decode(String),

    #[error("Unsupported program version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Every unresolved reference found while linking.
    #[error("Linking failed with {} error(s)", .0.len())]
    Link(Vec<LinkError>),

    #[error(transparent)]
    Build(#[from] BuildError),
}
