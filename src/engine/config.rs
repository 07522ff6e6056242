//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default bound on transitions applied within one tick.
pub const DEFAULT_MAX_TRANSITIONS_PER_TICK: usize = 10;

/// Default number of transition records kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Tunables for a [`StateTree`](super::StateTree).
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use statetree::engine::TreeConfig;
///
/// let config: TreeConfig = serde_json::from_str(r#"{ "history_capacity": 8 }"#).unwrap();
/// assert_eq!(config.max_transitions_per_tick, 10);
/// assert_eq!(config.history_capacity, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Transitions applied per tick before the cascade is cut off.
    pub max_transitions_per_tick: usize,
    /// Transition records retained by the tree's history.
    pub history_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_transitions_per_tick: DEFAULT_MAX_TRANSITIONS_PER_TICK,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
