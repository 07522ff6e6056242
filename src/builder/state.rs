//! Builder for a single state definition.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::context::Context;
use crate::core::{Condition, SelectionBehavior, StateDefinition, StateId, Task};

/// Accumulates the parts of one state. Nothing is visible to a tree until the
/// built definition is published through
/// [`StateTreeBuilder::state`](super::StateTreeBuilder::state).
///
/// # Example
///
/// ```rust
/// use statetree::builder::{StateBuilder, TransitionBuilder};
/// use statetree::core::{SelectionBehavior, Wait};
///
/// let root = StateBuilder::new("Root")
///     .selection(SelectionBehavior::ChildrenInOrder)
///     .child("Idle")
///     .build()
///     .unwrap();
/// assert_eq!(root.children().len(), 1);
///
/// let idle = StateBuilder::new("Idle")
///     .parent("Root")
///     .task(Wait::new(2.0))
///     .transition(TransitionBuilder::new("Patrol").on_state_succeeded())
///     .build()
///     .unwrap();
/// assert_eq!(idle.task_count(), 1);
/// ```
pub struct StateBuilder {
    id: StateId,
    parent: Option<StateId>,
    children: Vec<StateId>,
    tasks: Vec<Box<dyn Task>>,
    transitions: Vec<TransitionBuilder>,
    enter_conditions: Vec<Box<dyn Condition>>,
    selection: SelectionBehavior,
}

impl StateBuilder {
    /// Start a state with default selection and no behavior.
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            tasks: Vec::new(),
            transitions: Vec::new(),
            enter_conditions: Vec::new(),
            selection: SelectionBehavior::EnterState,
        }
    }

    /// Id of the state being built.
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// Set the parent.
    pub fn parent(mut self, parent: impl Into<StateId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<StateId>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children in order.
    pub fn children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StateId>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a task.
    pub fn task(self, task: impl Task + 'static) -> Self {
        self.boxed_task(Box::new(task))
    }

    /// Append an already boxed task.
    pub fn boxed_task(mut self, task: Box<dyn Task>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Append a transition.
    pub fn transition(mut self, transition: TransitionBuilder) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a condition checked before the state can be entered.
    pub fn enter_condition(self, condition: impl Condition + 'static) -> Self {
        self.boxed_enter_condition(Box::new(condition))
    }

    /// Add an enter condition using a closure.
    pub fn enter_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.enter_condition(predicate)
    }

    /// Add an already boxed enter condition.
    pub fn boxed_enter_condition(mut self, condition: Box<dyn Condition>) -> Self {
        self.enter_conditions.push(condition);
        self
    }

    /// Set how selection treats the children.
    pub fn selection(mut self, selection: SelectionBehavior) -> Self {
        self.selection = selection;
        self
    }

    /// Finalize the definition.
    ///
    /// Only local shape is checked here (non-empty ids and targets). Missing
    /// parents, dangling targets and cycles surface lazily when the engine
    /// tries to select a path.
    pub fn build(self) -> Result<StateDefinition, BuildError> {
        if self.id.is_empty() {
            return Err(BuildError::EmptyStateId);
        }

        let transitions = self
            .transitions
            .into_iter()
            .map(|transition| {
                transition.build().ok_or_else(|| BuildError::EmptyTarget {
                    state: self.id.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StateDefinition {
            id: self.id,
            parent: self.parent.filter(|parent| !parent.is_empty()),
            children: self.children,
            tasks: self.tasks,
            transitions,
            enter_conditions: self.enter_conditions,
            selection: self.selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, Wait};

    #[test]
    fn builder_validates_required_fields() {
        let result = StateBuilder::new("").build();
        assert!(matches!(result, Err(BuildError::EmptyStateId)));
    }

    #[test]
    fn empty_transition_target_is_rejected() {
        let result = StateBuilder::new("Idle")
            .transition(TransitionBuilder::new(""))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::EmptyTarget {
                state: StateId::from("Idle")
            }
        );
    }

    #[test]
    fn fluent_api_builds_definition() {
        let def = StateBuilder::new("Patrol")
            .parent("Root")
            .children(["A", "B"])
            .task(Wait::new(1.0))
            .enter_condition(Constant(true))
            .enter_when(|_ctx: &Context| true)
            .transition(TransitionBuilder::new("Idle"))
            .selection(SelectionBehavior::ChildrenInOrder)
            .build()
            .unwrap();

        assert_eq!(def.id(), &StateId::from("Patrol"));
        assert_eq!(def.parent(), Some(&StateId::from("Root")));
        assert_eq!(def.children(), &[StateId::from("A"), StateId::from("B")]);
        assert_eq!(def.task_count(), 1);
        assert_eq!(def.enter_condition_count(), 2);
        assert_eq!(def.transitions().len(), 1);
        assert_eq!(def.selection(), SelectionBehavior::ChildrenInOrder);
    }

    #[test]
    fn empty_parent_means_root() {
        let def = StateBuilder::new("Root").parent("").build().unwrap();
        assert_eq!(def.parent(), None);
    }
}
