//! Builder for constructing state trees.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::StateDefinition;
use crate::engine::{LogSink, StateGraph, StateTree, TracingSink, TreeConfig};
use std::sync::Arc;

/// Builder for constructing a [`StateTree`] with a fluent API.
///
/// States are published one at a time; a duplicate id is rejected with
/// [`BuildError::DuplicateState`]. No structural validation happens here.
///
/// # Example
///
/// ```rust
/// use statetree::builder::{StateBuilder, StateTreeBuilder, TransitionBuilder};
/// use statetree::core::SelectionBehavior;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = StateTreeBuilder::new()
///     .state(
///         StateBuilder::new("Root")
///             .selection(SelectionBehavior::ChildrenInOrder)
///             .child("Idle"),
///     )?
///     .state(
///         StateBuilder::new("Idle")
///             .parent("Root")
///             .transition(TransitionBuilder::new("Done").on_state_succeeded()),
///     )?
///     .state(StateBuilder::new("Done").parent("Root"))?
///     .build();
///
/// tree.start("Root")?;
/// assert_eq!(tree.active_path(), ["Root", "Idle"]);
/// # Ok(())
/// # }
/// ```
pub struct StateTreeBuilder {
    graph: StateGraph,
    config: TreeConfig,
    sink: Arc<dyn LogSink>,
}

impl StateTreeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            graph: StateGraph::new(),
            config: TreeConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Finalize a state builder and publish its definition.
    pub fn state(self, builder: StateBuilder) -> Result<Self, BuildError> {
        let definition = builder.build()?;
        self.add_state(definition)
    }

    /// Publish a pre-built definition.
    pub fn add_state(mut self, definition: StateDefinition) -> Result<Self, BuildError> {
        self.graph.insert(definition)?;
        Ok(self)
    }

    /// Publish several state builders at once.
    pub fn states<I>(self, builders: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = StateBuilder>,
    {
        builders
            .into_iter()
            .try_fold(self, |tree, builder| tree.state(builder))
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the cascade bound.
    pub fn max_transitions_per_tick(mut self, limit: usize) -> Self {
        self.config.max_transitions_per_tick = limit;
        self
    }

    /// Route lifecycle messages to `sink` instead of `tracing`.
    pub fn sink(self, sink: impl LogSink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    /// Log to a sink the caller keeps a handle to.
    pub fn shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build the tree. It stays idle until [`StateTree::start`].
    pub fn build(self) -> StateTree {
        StateTree::new(self.graph, self.config, self.sink)
    }
}

impl Default for StateTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
