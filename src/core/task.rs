//! Per-state behavior units.

use crate::context::Context;
use crate::core::Status;
use serde::Deserialize;
use serde_json::Value;

/// A unit of behavior owned by a state.
///
/// The engine calls `enter_state` when the owning state is entered,
/// `tick` once per tree tick while it stays active, and `exit_state` when the
/// active path is left. Tasks may read and write the blackboard and send
/// events through the [`Context`].
///
/// # Example
///
/// ```rust
/// use statetree::context::Context;
/// use statetree::core::{Status, Task};
///
/// struct CountDown {
///     remaining: u32,
/// }
///
/// impl Task for CountDown {
///     fn enter_state(&mut self, _ctx: &Context) -> Status {
///         self.remaining = 3;
///         Status::Running
///     }
///
///     fn tick(&mut self, _ctx: &Context, _dt: f64) -> Status {
///         self.remaining -= 1;
///         if self.remaining == 0 {
///             Status::Succeeded
///         } else {
///             Status::Running
///         }
///     }
/// }
/// ```
pub trait Task: Send {
    fn enter_state(&mut self, _ctx: &Context) -> Status {
        Status::Running
    }

    fn tick(&mut self, ctx: &Context, delta_time: f64) -> Status;

    fn exit_state(&mut self, _ctx: &Context) {}
}

/// Runs until `seconds` of tick time have accumulated since entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Wait {
    seconds: f64,
    #[serde(skip)]
    elapsed: f64,
}

impl Wait {
    /// Wait for `seconds`.
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds,
            elapsed: 0.0,
        }
    }
}

impl Task for Wait {
    fn enter_state(&mut self, _ctx: &Context) -> Status {
        self.elapsed = 0.0;
        Status::Running
    }

    fn tick(&mut self, _ctx: &Context, delta_time: f64) -> Status {
        self.elapsed += delta_time;
        if self.elapsed >= self.seconds {
            Status::Succeeded
        } else {
            Status::Running
        }
    }
}

/// Writes a blackboard value on entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SetValue {
    key: String,
    value: Value,
}

impl SetValue {
    /// Write `value` under `key` on enter.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Task for SetValue {
    fn enter_state(&mut self, ctx: &Context) -> Status {
        ctx.set(self.key.clone(), self.value.clone());
        Status::Succeeded
    }

    fn tick(&mut self, _ctx: &Context, _delta_time: f64) -> Status {
        Status::Succeeded
    }
}

/// Sends an event on entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EmitEvent {
    event: String,
}

impl EmitEvent {
    /// Send `event` on enter.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }
}

impl Task for EmitEvent {
    fn enter_state(&mut self, ctx: &Context) -> Status {
        ctx.send_event(self.event.clone());
        Status::Succeeded
    }

    fn tick(&mut self, _ctx: &Context, _delta_time: f64) -> Status {
        Status::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_succeeds_after_duration() {
        let ctx = Context::new();
        let mut wait = Wait::new(0.05);

        assert_eq!(wait.enter_state(&ctx), Status::Running);
        assert_eq!(wait.tick(&ctx, 0.02), Status::Running);
        assert_eq!(wait.tick(&ctx, 0.02), Status::Running);
        assert_eq!(wait.tick(&ctx, 0.02), Status::Succeeded);
    }

    #[test]
    fn wait_restarts_on_reentry() {
        let ctx = Context::new();
        let mut wait = Wait::new(0.03);

        wait.enter_state(&ctx);
        assert_eq!(wait.tick(&ctx, 0.05), Status::Succeeded);

        wait.enter_state(&ctx);
        assert_eq!(wait.tick(&ctx, 0.01), Status::Running);
    }

    #[test]
    fn set_value_writes_on_enter() {
        let ctx = Context::new();
        let mut task = SetValue::new("mode", "chase");

        assert_eq!(task.enter_state(&ctx), Status::Succeeded);
        assert_eq!(ctx.get_str("mode").as_deref(), Some("chase"));
    }

    #[test]
    fn emit_event_fills_pending_slot() {
        let ctx = Context::new();
        let mut task = EmitEvent::new("Alarm");

        task.enter_state(&ctx);
        assert_eq!(ctx.pending_event().as_deref(), Some("Alarm"));
    }

    #[test]
    fn stock_tasks_deserialize_from_params() {
        let wait = Wait::deserialize(&serde_json::json!({ "seconds": 1.5 })).unwrap();
        assert_eq!(wait, Wait::new(1.5));

        let emit = EmitEvent::deserialize(&serde_json::json!({ "event": "Go" })).unwrap();
        assert_eq!(emit, EmitEvent::new("Go"));
    }
}
