//! Builder API for constructing state trees.
//!
//! This module provides fluent builders for states, transitions and whole
//! trees, plus the [`state_ids!`](crate::state_ids) macro for declaring
//! well-known ids as constants.

pub mod error;
pub mod macros;
pub mod state;
pub mod transition;
pub mod tree;

pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
pub use tree::StateTreeBuilder;
