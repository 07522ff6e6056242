//! Bounded record of fired transitions.
//!
//! Every transition the engine applies is appended here, whether or not the
//! target could be entered, so runaway cascades and failed selections can be
//! inspected after the fact.

use super::{Priority, StateId, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Tick counter value when the transition fired (0 for none yet).
    pub tick: u64,
    /// State that declared the transition.
    pub source: StateId,
    /// Leaf of the active path before the transition.
    pub from: Option<StateId>,
    /// Target of the transition.
    pub to: StateId,
    pub trigger: Trigger,
    pub priority: Priority,
    /// Whether selecting and entering the target succeeded.
    pub entered: bool,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, capacity-bounded history of transitions.
///
/// When full, the oldest record is dropped. A capacity of zero disables
/// recording.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use statetree::core::{Priority, StateId, TransitionHistory, TransitionRecord, Trigger};
///
/// let mut history = TransitionHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     tick: 1,
///     source: StateId::from("Idle"),
///     from: Some(StateId::from("Idle")),
///     to: StateId::from("Patrol"),
///     trigger: Trigger::OnTick,
///     priority: Priority::Normal,
///     entered: true,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&StateId::from("Idle"), &StateId::from("Patrol")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl TransitionHistory {
    /// Empty history keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when at capacity.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States traversed: the first record's `from` (when known), then the
    /// `to` of every record that was entered.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(from) = self.records.front().and_then(|first| first.from.as_ref()) {
            path.push(from);
        }
        for record in self.records.iter().filter(|record| record.entered) {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock time between the oldest and the newest record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of retained records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tick: u64, from: &str, to: &str, entered: bool) -> TransitionRecord {
        TransitionRecord {
            tick,
            source: StateId::from(from),
            from: Some(StateId::from(from)),
            to: StateId::from(to),
            trigger: Trigger::OnTick,
            priority: Priority::Normal,
            entered,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::with_capacity(4);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = TransitionHistory::with_capacity(4);
        history.record(record(1, "Idle", "Patrol", true));
        history.record(record(4, "Patrol", "Idle", true));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], "Idle");
        assert_eq!(path[1], "Patrol");
        assert_eq!(path[2], "Idle");
    }

    #[test]
    fn failed_entries_are_kept_but_not_on_path() {
        let mut history = TransitionHistory::with_capacity(4);
        history.record(record(1, "Idle", "Vault", false));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get_path(), vec![&StateId::from("Idle")]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut history = TransitionHistory::with_capacity(2);
        history.record(record(1, "A", "B", true));
        history.record(record(2, "B", "C", true));
        history.record(record(3, "C", "D", true));

        let ticks: Vec<u64> = history.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![2, 3]);
        assert_eq!(history.last().map(|r| r.to.as_str()), Some("D"));
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = TransitionHistory::with_capacity(0);
        history.record(record(1, "A", "B", true));
        assert!(history.is_empty());
    }

    #[test]
    fn single_record_has_zero_duration() {
        let mut history = TransitionHistory::with_capacity(2);
        history.record(record(1, "A", "B", true));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::with_capacity(4);
        history.record(record(1, "Idle", "Patrol", true));

        let json = serde_json::to_string(&history).unwrap();
        let back: TransitionHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
