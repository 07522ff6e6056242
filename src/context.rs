//! Shared blackboard and event slot for one tree.
//!
//! Every [`StateTree`](crate::engine::StateTree) owns exactly one `Context`,
//! created with the tree and handed to tasks and conditions by reference.
//! Application code outside the tick may read and write it through the
//! handle returned by `StateTree::context`.
//!
//! Each `set`/`get` is atomic on its own; there are no multi-key
//! transactions.

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Keyed store of dynamically typed values plus the tree's pending event.
///
/// Values are stored as [`serde_json::Value`]. The typed getters return
/// `None` both for a missing key and for a value of another type.
///
/// # Example
///
/// ```rust
/// use statetree::context::Context;
///
/// let ctx = Context::new();
/// ctx.set("target", "player");
/// ctx.set("distance", 12.5);
///
/// assert_eq!(ctx.get_str("target").as_deref(), Some("player"));
/// assert_eq!(ctx.get_f64("distance"), Some(12.5));
/// assert_eq!(ctx.get_bool("distance"), None);
/// ```
#[derive(Debug, Default)]
pub struct Context {
    data: RwLock<HashMap<String, Value>>,
    pending_event: Mutex<Option<String>>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.write().insert(key.into(), value.into());
    }

    /// Clone of the value under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    /// Remove and return the value under `key`.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.data.write().remove(key)
    }

    /// Whether `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Value under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.data.read().get(key)?.as_str().map(str::to_owned)
    }

    /// Value under `key` if it is a number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.read().get(key)?.as_f64()
    }

    /// Value under `key` if it is an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.read().get(key)?.as_i64()
    }

    /// Value under `key` if it is a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.read().get(key)?.as_bool()
    }

    /// Decode a stored value into `T`, or `None` if it does not fit.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        serde_json::from_value(value).ok()
    }

    /// Set the pending event, replacing any unconsumed one.
    ///
    /// Safe to call from inside task callbacks: the slot has its own lock, so
    /// the event becomes visible to the next arbitration pass of the tick
    /// that is running.
    pub fn send_event(&self, name: impl Into<String>) {
        *self.pending_event.lock() = Some(name.into());
    }

    /// Event waiting for the next arbitration pass.
    pub fn pending_event(&self) -> Option<String> {
        self.pending_event.lock().clone()
    }

    pub(crate) fn clear_event(&self) {
        self.pending_event.lock().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn typed_getters_reject_mismatches() {
        let ctx = Context::new();
        ctx.set("name", "orc");
        ctx.set("hp", 40);
        ctx.set("alert", false);

        assert_eq!(ctx.get_str("hp"), None);
        assert_eq!(ctx.get_i64("name"), None);
        assert_eq!(ctx.get_bool("hp"), None);
        assert_eq!(ctx.get_i64("hp"), Some(40));
        assert_eq!(ctx.get_bool("alert"), Some(false));
        assert_eq!(ctx.get_str("missing"), None);
    }

    #[test]
    fn set_overwrites_and_remove_deletes() {
        let ctx = Context::new();
        ctx.set("mode", "idle");
        ctx.set("mode", "hunt");
        assert_eq!(ctx.get_str("mode").as_deref(), Some("hunt"));

        assert!(ctx.remove("mode").is_some());
        assert!(!ctx.contains("mode"));
    }

    #[test]
    fn get_as_decodes_structured_values() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Point {
            x: f64,
            y: f64,
        }

        let ctx = Context::new();
        ctx.set("waypoint", serde_json::json!({ "x": 1.0, "y": -2.0 }));

        assert_eq!(ctx.get_as::<Point>("waypoint"), Some(Point { x: 1.0, y: -2.0 }));
        assert_eq!(ctx.get_as::<String>("waypoint"), None);
    }

    #[test]
    fn events_overwrite_and_clear() {
        let ctx = Context::new();
        assert_eq!(ctx.pending_event(), None);

        ctx.send_event("A");
        ctx.send_event("B");
        assert_eq!(ctx.pending_event().as_deref(), Some("B"));

        ctx.clear_event();
        assert_eq!(ctx.pending_event(), None);
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let ctx = Arc::new(Context::new());

        thread::scope(|scope| {
            for worker in 0..4 {
                let ctx = Arc::clone(&ctx);
                scope.spawn(move || {
                    for i in 0..100 {
                        ctx.set(format!("w{worker}"), i);
                        let _ = ctx.get_i64(&format!("w{worker}"));
                    }
                });
            }
        });

        for worker in 0..4 {
            assert_eq!(ctx.get_i64(&format!("w{worker}")), Some(99));
        }
    }
}
