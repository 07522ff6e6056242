//! Immutable state and transition definitions.
//!
//! Definitions are produced by the builders in [`crate::builder`] and are
//! read-only once published to a graph. Parent and child links are plain
//! [`StateId`] references into the owning graph, never pointers.

use super::{Condition, Priority, SelectionBehavior, StateId, Task, Trigger};
use std::fmt;

/// Rule moving the active path to `target` when its trigger fires and all of
/// its conditions hold.
pub struct Transition {
    pub(crate) target: StateId,
    pub(crate) trigger: Trigger,
    pub(crate) priority: Priority,
    pub(crate) conditions: Vec<Box<dyn Condition>>,
}

impl Transition {
    /// Target state.
    pub fn target(&self) -> &StateId {
        &self.target
    }

    /// Trigger.
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Number of conditions.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("trigger", &self.trigger)
            .field("priority", &self.priority)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// A node of the state graph.
pub struct StateDefinition {
    pub(crate) id: StateId,
    pub(crate) parent: Option<StateId>,
    pub(crate) children: Vec<StateId>,
    pub(crate) tasks: Vec<Box<dyn Task>>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) enter_conditions: Vec<Box<dyn Condition>>,
    pub(crate) selection: SelectionBehavior,
}

impl StateDefinition {
    /// State id.
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// Declared parent.
    pub fn parent(&self) -> Option<&StateId> {
        self.parent.as_ref()
    }

    /// Declared children, in order.
    pub fn children(&self) -> &[StateId] {
        &self.children
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Transitions, in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of enter conditions.
    pub fn enter_condition_count(&self) -> usize {
        self.enter_conditions.len()
    }

    /// Selection behavior.
    pub fn selection(&self) -> SelectionBehavior {
        self.selection
    }
}

impl fmt::Debug for StateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("tasks", &self.tasks.len())
            .field("transitions", &self.transitions)
            .field("enter_conditions", &self.enter_conditions.len())
            .field("selection", &self.selection)
            .finish()
    }
}
