//! Named task and condition factories.

use crate::core::{Condition, Constant, EmitEvent, Equals, Flag, SetValue, Task, Wait};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a task from its JSON parameters.
pub type TaskFactory = Arc<dyn Fn(&Value) -> Result<Box<dyn Task>, String> + Send + Sync>;

/// Builds a condition from its JSON parameters.
pub type ConditionFactory =
    Arc<dyn Fn(&Value) -> Result<Box<dyn Condition>, String> + Send + Sync>;

/// Lookup table from invocation kinds to factories.
///
/// Tasks and conditions live in separate namespaces. Registering a kind
/// twice replaces the earlier factory.
///
/// # Example
///
/// ```rust
/// use statetree::generator::Registry;
/// use serde_json::json;
///
/// let registry = Registry::with_builtins()
///     .register_condition("armed", |_params| Ok(Box::new(|ctx: &statetree::Context| {
///         ctx.get_bool("armed").unwrap_or(false)
///     })));
///
/// assert!(registry.has_task("wait"));
/// assert!(registry.has_condition("armed"));
/// assert!(matches!(registry.build_task("wait", &json!({ "seconds": 1.0 })), Some(Ok(_))));
/// assert!(matches!(registry.build_task("wait", &json!({ "secs": 1.0 })), Some(Err(_))));
/// assert!(registry.build_task("teleport", &json!(null)).is_none());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    tasks: HashMap<String, TaskFactory>,
    conditions: HashMap<String, ConditionFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the stock kinds.
    ///
    /// Tasks: `wait`, `set_value`, `emit_event`.
    /// Conditions: `always`, `never`, `flag`, `equals`.
    pub fn with_builtins() -> Self {
        Self::new()
            .register_task("wait", |params| Ok(Box::new(decode::<Wait>(params)?)))
            .register_task("set_value", |params| {
                Ok(Box::new(decode::<SetValue>(params)?))
            })
            .register_task("emit_event", |params| {
                Ok(Box::new(decode::<EmitEvent>(params)?))
            })
            .register_condition("always", |_| Ok(Box::new(Constant(true))))
            .register_condition("never", |_| Ok(Box::new(Constant(false))))
            .register_condition("flag", |params| Ok(Box::new(decode::<Flag>(params)?)))
            .register_condition("equals", |params| {
                Ok(Box::new(decode::<Equals>(params)?))
            })
    }

    /// Register a task factory under `kind`, replacing any previous one.
    pub fn register_task<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Value) -> Result<Box<dyn Task>, String> + Send + Sync + 'static,
    {
        self.tasks.insert(kind.into(), Arc::new(factory));
        self
    }

    /// Register a condition factory under `kind`, replacing any previous one.
    pub fn register_condition<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Value) -> Result<Box<dyn Condition>, String> + Send + Sync + 'static,
    {
        self.conditions.insert(kind.into(), Arc::new(factory));
        self
    }

    /// Whether a task factory is registered for `kind`.
    pub fn has_task(&self, kind: &str) -> bool {
        self.tasks.contains_key(kind)
    }

    /// Whether a condition factory is registered for `kind`.
    pub fn has_condition(&self, kind: &str) -> bool {
        self.conditions.contains_key(kind)
    }

    /// Run the task factory for `kind`. `None` if the kind is unknown.
    pub fn build_task(
        &self,
        kind: &str,
        params: &Value,
    ) -> Option<Result<Box<dyn Task>, String>> {
        self.tasks.get(kind).map(|factory| factory(params))
    }

    /// Run the condition factory for `kind`. `None` if the kind is unknown.
    pub fn build_condition(
        &self,
        kind: &str,
        params: &Value,
    ) -> Option<Result<Box<dyn Condition>, String>> {
        self.conditions.get(kind).map(|factory| factory(params))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tasks: Vec<_> = self.tasks.keys().collect();
        let mut conditions: Vec<_> = self.conditions.keys().collect();
        tasks.sort();
        conditions.sort();
        f.debug_struct("Registry")
            .field("tasks", &tasks)
            .field("conditions", &conditions)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(params: &Value) -> Result<T, String> {
    T::deserialize(params).map_err(|e| e.to_string())
}
