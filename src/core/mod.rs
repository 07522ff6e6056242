//! Core state tree types.
//!
//! This module contains the vocabulary shared by the builders, the engine
//! and the generator:
//! - State identifiers and the status/priority/trigger enums
//! - The `Task` and `Condition` capability traits, with stock implementations
//! - Immutable state and transition definitions
//! - Bounded transition history

mod condition;
mod definition;
mod history;
mod id;
mod kinds;
mod task;

pub use condition::{test_all, Condition, Constant, Equals, Flag, Not};
pub use definition::{StateDefinition, Transition};
pub use history::{TransitionHistory, TransitionRecord};
pub use id::StateId;
pub use kinds::{Priority, SelectionBehavior, Status, Trigger};
pub use task::{EmitEvent, SetValue, Task, Wait};
