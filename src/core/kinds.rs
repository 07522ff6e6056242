//! Plain enums shared by the graph model and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a task, or the derived result of a leaf state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Running,
    Succeeded,
    Failed,
}

impl Status {
    /// Whether this is `Running`.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether this is `Succeeded`.
    pub fn is_succeeded(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Whether this is `Failed`.
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Arbitration order among simultaneously eligible transitions.
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// `Low < Normal < High < Critical`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// What makes a transition eligible for evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Holds on every arbitration pass.
    #[default]
    OnTick,
    /// Holds while the pending event has this name.
    OnEvent(String),
    /// Holds when the declaring state is the last completed state.
    OnStateCompleted,
    /// Like `OnStateCompleted`, and the completion status is `Succeeded`.
    OnStateSucceeded,
    /// Like `OnStateCompleted`, and the completion status is `Failed`.
    OnStateFailed,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTick => f.write_str("OnTick"),
            Self::OnEvent(name) => write!(f, "OnEvent({name})"),
            Self::OnStateCompleted => f.write_str("OnStateCompleted"),
            Self::OnStateSucceeded => f.write_str("OnStateSucceeded"),
            Self::OnStateFailed => f.write_str("OnStateFailed"),
        }
    }
}

/// How a state with children resolves the leaf that actually gets entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionBehavior {
    /// Enter the state itself; children are only reached by transitions.
    #[default]
    EnterState,
    /// Enter the first child, in declared order, whose selection succeeds.
    ChildrenInOrder,
    /// Currently resolved exactly like `ChildrenInOrder`.
    ChildrenRandom,
}

impl SelectionBehavior {
    /// Whether selection descends into children.
    pub fn selects_children(self) -> bool {
        !matches!(self, Self::EnterState)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_ordered() {
        assert!(Priority::Low < Priority::Normal);
        assert!(Priority::Normal < Priority::High);
        assert!(Priority::High < Priority::Critical);
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn status_predicates() {
        assert!(Status::Running.is_running());
        assert!(Status::Succeeded.is_succeeded());
        assert!(Status::Failed.is_failed());
        assert!(!Status::Failed.is_succeeded());
        assert_eq!(Status::default(), Status::Running);
    }

    #[test]
    fn trigger_json_shape() {
        let json = serde_json::to_string(&Trigger::OnEvent("Spotted".into())).unwrap();
        assert_eq!(json, r#"{"OnEvent":"Spotted"}"#);

        let tick: Trigger = serde_json::from_str(r#""OnTick""#).unwrap();
        assert_eq!(tick, Trigger::OnTick);
    }

    #[test]
    fn only_child_policies_select_children() {
        assert!(!SelectionBehavior::EnterState.selects_children());
        assert!(SelectionBehavior::ChildrenInOrder.selects_children());
        assert!(SelectionBehavior::ChildrenRandom.selects_children());
    }

    #[test]
    fn display_names() {
        assert_eq!(Status::Succeeded.to_string(), "Succeeded");
        assert_eq!(Priority::Critical.to_string(), "Critical");
        assert_eq!(Trigger::OnEvent("Go".into()).to_string(), "OnEvent(Go)");
    }
}
