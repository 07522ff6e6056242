//! Conditions gating transitions and state entry.
//!
//! A condition is a predicate over the [`Context`]. It may read the
//! blackboard but must not mutate the tree; the engine evaluates conditions
//! during arbitration and selection and assumes re-evaluating one gives the
//! same answer within a pass.

use crate::context::Context;
use serde::Deserialize;
use serde_json::Value;

/// Predicate evaluated against the blackboard.
///
/// Any `Fn(&Context) -> bool + Send + Sync` closure is a condition.
///
/// # Example
///
/// ```rust
/// use statetree::context::Context;
/// use statetree::core::Condition;
///
/// let low_health = |ctx: &Context| ctx.get_f64("health").is_some_and(|h| h < 25.0);
///
/// let ctx = Context::new();
/// ctx.set("health", 10.0);
/// assert!(low_health.test(&ctx));
///
/// ctx.set("health", 80.0);
/// assert!(!low_health.test(&ctx));
/// ```
pub trait Condition: Send + Sync {
    fn test(&self, ctx: &Context) -> bool;
}

impl<F> Condition for F
where
    F: Fn(&Context) -> bool + Send + Sync,
{
    fn test(&self, ctx: &Context) -> bool {
        self(ctx)
    }
}

/// AND of all conditions; an empty set holds.
pub fn test_all(conditions: &[Box<dyn Condition>], ctx: &Context) -> bool {
    conditions.iter().all(|condition| condition.test(ctx))
}

/// Condition with a fixed answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constant(pub bool);

impl Condition for Constant {
    fn test(&self, _ctx: &Context) -> bool {
        self.0
    }
}

/// Holds when `key` stores the boolean `true`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Flag {
    key: String,
}

impl Flag {
    /// Flag reading `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Condition for Flag {
    fn test(&self, ctx: &Context) -> bool {
        ctx.get_bool(&self.key).unwrap_or(false)
    }
}

/// Holds when `key` stores exactly `value`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Equals {
    key: String,
    value: Value,
}

impl Equals {
    /// True when `key` holds `value`.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Condition for Equals {
    fn test(&self, ctx: &Context) -> bool {
        ctx.get(&self.key).is_some_and(|stored| stored == self.value)
    }
}

/// Negation of another condition.
pub struct Not(Box<dyn Condition>);

impl Not {
    /// Negate `inner`.
    pub fn new(inner: impl Condition + 'static) -> Self {
        Self(Box::new(inner))
    }
}

impl Condition for Not {
    fn test(&self, ctx: &Context) -> bool {
        !self.0.test(ctx)
    }
}
