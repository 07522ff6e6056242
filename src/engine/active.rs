//! Runtime records of entered states.

use crate::core::{StateId, Status};
use serde::{Deserialize, Serialize};

/// One entry of the active path: the state's id plus the last status of each
/// of its tasks, aligned with the definition's task order.
///
/// The definition itself is looked up in the tree's graph by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveState {
    id: StateId,
    task_statuses: Vec<Status>,
}

impl ActiveState {
    pub(crate) fn new(id: StateId, task_count: usize) -> Self {
        Self {
            id,
            task_statuses: vec![Status::Running; task_count],
        }
    }

    /// Id of the active state.
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// Last status reported by each task, in declaration order.
    pub fn task_statuses(&self) -> &[Status] {
        &self.task_statuses
    }

    pub(crate) fn set_status(&mut self, task: usize, status: Status) {
        if let Some(slot) = self.task_statuses.get_mut(task) {
            *slot = status;
        }
    }

    /// Derived status of a leaf: `Succeeded` once every task has succeeded
    /// (immediately, for a state without tasks), `Failed` if any task failed.
    pub fn status(&self) -> Status {
        if self.task_statuses.iter().any(|status| status.is_failed()) {
            Status::Failed
        } else if self.task_statuses.iter().all(|status| status.is_succeeded()) {
            Status::Succeeded
        } else {
            Status::Running
        }
    }
}
