//! Selection errors.

use crate::core::StateId;
use thiserror::Error;

/// Reasons a path to a target could not be selected.
///
/// Returned by [`StateTree::start`](super::StateTree::start). When the same
/// failure happens while applying a transition, the previous path has
/// already been exited and the tree is left without an active state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("State '{missing}' on the path to '{target}' is not defined")]
    UnresolvableTarget { target: StateId, missing: StateId },

    #[error("Enter conditions rejected state '{state}'")]
    SelectionFailed { state: StateId },

    #[error("No child of '{state}' could be selected")]
    NoSelectableChild { state: StateId },

    #[error("Cycle detected while resolving '{state}'")]
    Cycle { state: StateId },
}

impl SelectionError {
    /// The state at which selection stopped.
    pub fn state(&self) -> &StateId {
        match self {
            Self::UnresolvableTarget { missing, .. } => missing,
            Self::SelectionFailed { state }
            | Self::NoSelectableChild { state }
            | Self::Cycle { state } => state,
        }
    }
}
