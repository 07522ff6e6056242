//! Build errors for state, transition and tree builders.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building definitions and publishing them to a
/// graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("State id must not be empty")]
    EmptyStateId,

    #[error("Transition declared on '{state}' has an empty target")]
    EmptyTarget { state: StateId },

    #[error("State '{id}' is already defined")]
    DuplicateState { id: StateId },
}
