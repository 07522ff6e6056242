//! Declarative tree descriptions.
//!
//! A description is plain data: ids, links, and named invocations of task
//! and condition factories. It is usually loaded from JSON by the host
//! application, or assembled with the small builder methods here.

use crate::core::{Priority, SelectionBehavior, StateId, Trigger};
use crate::generator::GeneratorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named factory call with JSON parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invocation {
    pub kind: String,
    pub params: Value,
}

impl Invocation {
    /// Invocation of `kind` with `params`.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }

    /// An invocation without parameters.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionDescription {
    pub target: StateId,
    pub trigger: Trigger,
    pub priority: Priority,
    pub conditions: Vec<Invocation>,
}

impl TransitionDescription {
    /// Transition to `target`, on every tick at normal priority.
    pub fn new(target: impl Into<StateId>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Set the trigger.
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Add a condition.
    pub fn condition(mut self, condition: Invocation) -> Self {
        self.conditions.push(condition);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateDescription {
    pub id: StateId,
    pub parent: Option<StateId>,
    pub children: Vec<StateId>,
    pub selection: SelectionBehavior,
    pub tasks: Vec<Invocation>,
    pub enter_conditions: Vec<Invocation>,
    pub transitions: Vec<TransitionDescription>,
}

impl StateDescription {
    /// State with no parent, children or behavior.
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
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

    /// Set the selection behavior.
    pub fn selection(mut self, selection: SelectionBehavior) -> Self {
        self.selection = selection;
        self
    }

    /// Append a task.
    pub fn task(mut self, task: Invocation) -> Self {
        self.tasks.push(task);
        self
    }

    /// Add an enter condition.
    pub fn enter_condition(mut self, condition: Invocation) -> Self {
        self.enter_conditions.push(condition);
        self
    }

    /// Append a transition.
    pub fn transition(mut self, transition: TransitionDescription) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// A whole tree as data. States keep their declaration order.
///
/// # Example
///
/// ```rust
/// use statetree::generator::TreeDescription;
///
/// let description = TreeDescription::from_json(r#"{
///     "name": "guard",
///     "states": [
///         { "id": "Idle", "transitions": [{ "target": "Alert", "trigger": { "OnEvent": "Noise" } }] },
///         { "id": "Alert", "tasks": [{ "kind": "wait", "params": { "seconds": 2.0 } }] }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(description.states.len(), 2);
/// assert_eq!(description.states[1].tasks[0].kind, "wait");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeDescription {
    pub name: String,
    pub states: Vec<StateDescription>,
}

impl TreeDescription {
    /// Empty description called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
        }
    }

    /// Append a state.
    pub fn state(mut self, state: StateDescription) -> Self {
        self.states.push(state);
        self
    }

    /// Parse a description from JSON.
    pub fn from_json(text: &str) -> Result<Self, GeneratorError> {
        serde_json::from_str(text).map_err(|e| GeneratorError::Parse(e.to_string()))
    }

    /// Serialize the description as pretty JSON.
    pub fn to_json(&self) -> Result<String, GeneratorError> {
        serde_json::to_string_pretty(self).map_err(|e| GeneratorError::Encode(e.to_string()))
    }
}
