//! Statetree: a hierarchical, tick-driven state machine runtime
//!
//! A state tree keeps one path of nested states active, from a parentless
//! root down to a leaf. Every [`tick`](StateTree::tick) runs the tasks on that
//! path, then arbitrates transitions by trigger, conditions and priority,
//! applying a bounded cascade of them.
//!
//! # Core Concepts
//!
//! - **States**: definitions with a parent, ordered children, tasks,
//!   transitions, enter conditions and a child selection policy
//! - **Tasks**: per-state behavior with enter, tick and exit callbacks
//! - **Conditions**: predicates over the shared [`Context`] blackboard
//! - **Transitions**: prioritized rules fired by ticks, events or state
//!   completion, innermost state first on ties
//! - **Generator**: a pure compiler from declarative descriptions to
//!   realizable programs
//!
//! # Example
//!
//! ```rust
//! use statetree::builder::{StateBuilder, TransitionBuilder};
//! use statetree::core::{Priority, Wait};
//! use statetree::StateTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = StateTree::builder()
//!     .state(StateBuilder::new("Root").child("Idle"))?
//!     .state(
//!         StateBuilder::new("Idle")
//!             .parent("Root")
//!             .task(Wait::new(0.03))
//!             .transition(TransitionBuilder::new("Chase").on_event("Spotted").priority(Priority::High))
//!             .transition(TransitionBuilder::new("Idle").on_state_succeeded()),
//!     )?
//!     .state(StateBuilder::new("Chase").parent("Root"))?
//!     .build();
//!
//! tree.start("Idle")?;
//! tree.tick(0.016);
//! tree.send_event("Spotted");
//! tree.tick(0.016);
//!
//! assert_eq!(tree.current_state().as_deref(), Some("Chase"));
//! assert_eq!(tree.active_path(), ["Root", "Chase"]);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod context;
pub mod core;
pub mod engine;
pub mod generator;

// Re-export commonly used types
pub use crate::builder::{BuildError, StateBuilder, StateTreeBuilder, TransitionBuilder};
pub use crate::context::Context;
pub use crate::core::{Condition, Priority, SelectionBehavior, StateId, Status, Task, Trigger};
pub use crate::engine::{SelectionError, StateTree, TickReport, TreeConfig};
pub use crate::generator::{compile, GeneratorError, Registry, TreeDescription, TreeProgram};
