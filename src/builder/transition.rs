//! Builder for constructing transitions.

use crate::context::Context;
use crate::core::{Condition, Priority, StateId, Transition, Trigger};

/// Builder for constructing transitions with a fluent API.
///
/// Defaults to an `OnTick` trigger at `Normal` priority with no conditions.
///
/// # Example
///
/// ```rust
/// use statetree::builder::TransitionBuilder;
/// use statetree::core::{Flag, Priority, Trigger};
///
/// let chase = TransitionBuilder::new("Chase")
///     .on_event("EnemySpotted")
///     .priority(Priority::High)
///     .condition(Flag::new("enemy_nearby"));
///
/// assert_eq!(chase.target().as_str(), "Chase");
/// assert_eq!(chase.current_trigger(), &Trigger::OnEvent("EnemySpotted".into()));
/// ```
pub struct TransitionBuilder {
    target: StateId,
    trigger: Trigger,
    priority: Priority,
    conditions: Vec<Box<dyn Condition>>,
}

impl TransitionBuilder {
    /// Create a new transition builder towards `target`.
    pub fn new(target: impl Into<StateId>) -> Self {
        Self {
            target: target.into(),
            trigger: Trigger::OnTick,
            priority: Priority::Normal,
            conditions: Vec::new(),
        }
    }

    /// Target state.
    pub fn target(&self) -> &StateId {
        &self.target
    }

    /// Trigger set so far.
    pub fn current_trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Fire on every tick.
    pub fn on_tick(self) -> Self {
        self.trigger(Trigger::OnTick)
    }

    /// Fire when the named event is pending.
    pub fn on_event(self, name: impl Into<String>) -> Self {
        self.trigger(Trigger::OnEvent(name.into()))
    }

    /// Fire when the owning state completes either way.
    pub fn on_state_completed(self) -> Self {
        self.trigger(Trigger::OnStateCompleted)
    }

    /// Fire when the owning state succeeds.
    pub fn on_state_succeeded(self) -> Self {
        self.trigger(Trigger::OnStateSucceeded)
    }

    /// Fire when the owning state fails.
    pub fn on_state_failed(self) -> Self {
        self.trigger(Trigger::OnStateFailed)
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

    /// Add a condition; all conditions must hold for the transition to fire.
    pub fn condition(self, condition: impl Condition + 'static) -> Self {
        self.boxed_condition(Box::new(condition))
    }

    /// Add a condition using a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.condition(predicate)
    }

    /// Add an already boxed condition.
    pub fn boxed_condition(mut self, condition: Box<dyn Condition>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Build the transition. `None` is returned for an empty target; the
    /// owning [`StateBuilder`](super::StateBuilder) turns that into a
    /// [`BuildError::EmptyTarget`](super::BuildError::EmptyTarget).
    pub(crate) fn build(self) -> Option<Transition> {
        if self.target.is_empty() {
            return None;
        }
        Some(Transition {
            target: self.target,
            trigger: self.trigger,
            priority: self.priority,
            conditions: self.conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Constant;

    #[test]
    fn defaults_to_normal_on_tick() {
        let transition = TransitionBuilder::new("Patrol").build().unwrap();

        assert_eq!(transition.target(), &StateId::from("Patrol"));
        assert_eq!(transition.trigger(), &Trigger::OnTick);
        assert_eq!(transition.priority(), Priority::Normal);
        assert_eq!(transition.condition_count(), 0);
    }

    #[test]
    fn trigger_shortcuts_set_the_trigger() {
        let cases = [
            (TransitionBuilder::new("A").on_state_completed(), Trigger::OnStateCompleted),
            (TransitionBuilder::new("A").on_state_succeeded(), Trigger::OnStateSucceeded),
            (TransitionBuilder::new("A").on_state_failed(), Trigger::OnStateFailed),
            (
                TransitionBuilder::new("A").on_event("Go").on_tick(),
                Trigger::OnTick,
            ),
        ];

        for (builder, expected) in cases {
            assert_eq!(builder.build().unwrap().trigger(), &expected);
        }
    }

    #[test]
    fn conditions_accumulate() {
        let transition = TransitionBuilder::new("Chase")
            .priority(Priority::Critical)
            .condition(Constant(true))
            .when(|ctx: &Context| ctx.contains("target"))
            .build()
            .unwrap();

        assert_eq!(transition.priority(), Priority::Critical);
        assert_eq!(transition.condition_count(), 2);
    }

    #[test]
    fn empty_target_does_not_build() {
        assert!(TransitionBuilder::new("").build().is_none());
    }
}
