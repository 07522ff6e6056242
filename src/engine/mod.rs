//! Execution engine: graph storage, path selection and the tick loop.
//!
//! [`StateTree`] owns a [`StateGraph`] and the runtime fields that change
//! while it runs. Lifecycle messages go to a [`LogSink`]; internal
//! diagnostics go through `tracing`.

mod active;
mod config;
mod error;
mod graph;
mod log;
mod select;
mod tree;

pub use active::ActiveState;
pub use config::{TreeConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_TRANSITIONS_PER_TICK};
pub use error::SelectionError;
pub use graph::StateGraph;
pub use log::{LogSink, MemorySink, NullSink, SinkError, TracingSink};
pub use tree::{StateTree, TickReport, TreeStats};
