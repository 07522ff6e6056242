//! Deterministic tree generation.
//!
//! A [`TreeDescription`] is compiled into a [`TreeProgram`] by the pure
//! function [`compile`]: identical descriptions give byte-identical programs.
//! A program is realized against a [`Registry`] of task and condition
//! factories, which drives the regular builder API. The result behaves
//! exactly like a tree built by hand from the same description.
//!
//! Only factory resolution is checked when instantiating. Dangling targets,
//! missing parents and cycles fail when the tree tries to select them.
//!
//! # Example
//!
//! ```rust
//! use statetree::engine::TreeConfig;
//! use statetree::generator::{generate, Registry, TreeDescription};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let description = TreeDescription::from_json(r#"{
//!     "name": "sentry",
//!     "states": [
//!         { "id": "Watch", "transitions": [{ "target": "Alarm", "trigger": { "OnEvent": "Intruder" } }] },
//!         { "id": "Alarm", "tasks": [{ "kind": "set_value", "params": { "key": "alarm", "value": true } }] }
//!     ]
//! }"#)?;
//!
//! let tree = generate(&description, &Registry::with_builtins(), TreeConfig::default())?;
//! tree.start("Watch")?;
//! tree.send_event("Intruder");
//! tree.tick(0.016);
//!
//! assert_eq!(tree.current_state().as_deref(), Some("Alarm"));
//! assert_eq!(tree.context().get_bool("alarm"), Some(true));
//! # Ok(())
//! # }
//! ```

mod description;
mod error;
mod link;
mod program;
mod registry;

pub use description::{Invocation, StateDescription, TransitionDescription, TreeDescription};
pub use error::{GeneratorError, LinkError};
pub use program::{
    compile, NodeRef, ProgramInvocation, ProgramState, ProgramTransition, TreeProgram,
    PROGRAM_VERSION,
};
pub use registry::{ConditionFactory, Registry, TaskFactory};

use crate::engine::{StateTree, TreeConfig};

/// Compile `description` and instantiate it in one step.
pub fn generate(
    description: &TreeDescription,
    registry: &Registry,
    config: TreeConfig,
) -> Result<StateTree, GeneratorError> {
    compile(description).instantiate(registry, config)
}
