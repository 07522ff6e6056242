//! Tick-driven state tree runtime.

use crate::builder::StateTreeBuilder;
use crate::context::Context;
use crate::core::{
    test_all, Priority, StateId, Status, Transition, TransitionHistory, TransitionRecord, Trigger,
};
use crate::engine::select::select;
use crate::engine::{ActiveState, LogSink, SelectionError, StateGraph, TreeConfig};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Outcome of one [`StateTree::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Value of the tick counter for this tick (first tick is 1).
    pub tick: u64,
    /// Transitions applied during the tick.
    pub transitions: usize,
    /// Whether the transition loop stopped at its bound rather than running
    /// out of candidates.
    pub saturated: bool,
}

/// Running counters for a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub ticks: u64,
    pub transitions: u64,
    pub saturated_cascades: u64,
    pub failed_selections: u64,
}

/// Borrowed collaborators handed to every runtime step.
struct Env<'a> {
    ctx: &'a Context,
    sink: &'a dyn LogSink,
}

impl Env<'_> {
    fn log(&self, message: &str) {
        if let Err(err) = self.sink.log(message) {
            warn!(%err, "log sink rejected message");
        }
    }
}

/// A candidate picked by arbitration.
struct Chosen {
    source: StateId,
    target: StateId,
    trigger: Trigger,
    priority: Priority,
}

/// Mutable state guarded by the tree's lock.
struct Runtime {
    graph: StateGraph,
    active: Vec<ActiveState>,
    current: Option<StateId>,
    last_completed: Option<StateId>,
    last_status: Status,
    history: TransitionHistory,
    stats: TreeStats,
}

impl Runtime {
    /// Call `exit_state` leaf to root, each state's tasks in reverse order,
    /// then clear the active path.
    fn exit_path(&mut self, env: &Env<'_>) {
        for active in self.active.iter().rev() {
            env.log(&format!("exit '{}'", active.id()));
            if let Some(definition) = self.graph.get_mut(active.id()) {
                for task in definition.tasks.iter_mut().rev() {
                    task.exit_state(env.ctx);
                }
            }
        }
        self.active.clear();
    }

    /// Call `enter_state` root to leaf. Returns the first state whose task
    /// failed; entering stops there.
    fn enter_path(&mut self, env: &Env<'_>) -> Option<StateId> {
        for active in self.active.iter_mut() {
            env.log(&format!("enter '{}'", active.id()));
            let Some(definition) = self.graph.get_mut(active.id()) else {
                continue;
            };
            for (index, task) in definition.tasks.iter_mut().enumerate() {
                let status = task.enter_state(env.ctx);
                active.set_status(index, status);
                if status.is_failed() {
                    debug!(state = %active.id(), task = index, "enter failed");
                    return Some(active.id().clone());
                }
            }
        }
        None
    }

    /// Exit whatever is active, then select and enter `target`.
    fn activate(
        &mut self,
        env: &Env<'_>,
        target: &StateId,
    ) -> Result<Option<StateId>, SelectionError> {
        self.exit_path(env);
        match select(&self.graph, env.ctx, target) {
            Ok(path) => {
                self.active = path;
                self.current = Some(target.clone());
                Ok(self.enter_path(env))
            }
            Err(err) => {
                self.current = None;
                self.stats.failed_selections += 1;
                env.log(&format!("selection of '{target}' failed: {err}"));
                Err(err)
            }
        }
    }

    /// Tick tasks root to leaf, stopping at the first failure. A leaf
    /// without tasks always completes as succeeded, even below a failure.
    fn run_tasks(&mut self, env: &Env<'_>, delta_time: f64) {
        let mut failed = false;
        'path: for active in self.active.iter_mut() {
            let Some(definition) = self.graph.get_mut(active.id()) else {
                continue;
            };
            for (index, task) in definition.tasks.iter_mut().enumerate() {
                let status = task.tick(env.ctx, delta_time);
                active.set_status(index, status);
                if status.is_failed() {
                    debug!(state = %active.id(), task = index, "task failed");
                    self.last_completed = Some(active.id().clone());
                    self.last_status = Status::Failed;
                    failed = true;
                    break 'path;
                }
            }
        }

        if let Some(leaf) = self.active.last() {
            let empty = leaf.task_statuses().is_empty();
            if empty || (!failed && leaf.status().is_succeeded()) {
                debug!(state = %leaf.id(), "leaf succeeded");
                self.last_completed = Some(leaf.id().clone());
                self.last_status = Status::Succeeded;
            }
        }
    }

    fn is_triggered(&self, trigger: &Trigger, state: &StateId, event: Option<&str>) -> bool {
        let completed = self.last_completed.as_ref() == Some(state);
        match trigger {
            Trigger::OnTick => true,
            Trigger::OnEvent(name) => event == Some(name.as_str()),
            Trigger::OnStateCompleted => completed,
            Trigger::OnStateSucceeded => completed && self.last_status.is_succeeded(),
            Trigger::OnStateFailed => completed && self.last_status.is_failed(),
        }
    }

    fn is_candidate(
        &self,
        transition: &Transition,
        state: &StateId,
        env: &Env<'_>,
        event: Option<&str>,
    ) -> bool {
        self.is_triggered(&transition.trigger, state, event)
            && test_all(&transition.conditions, env.ctx)
            && self.graph.can_select(&transition.target, env.ctx)
    }

    /// Scan leaf to root and keep the first transition of the highest
    /// priority, so equal priorities resolve to the innermost state.
    fn arbitrate(&self, env: &Env<'_>) -> Option<Chosen> {
        let event = env.ctx.pending_event();
        let mut best: Option<Chosen> = None;

        for active in self.active.iter().rev() {
            let Some(definition) = self.graph.get(active.id()) else {
                continue;
            };
            for transition in &definition.transitions {
                if best
                    .as_ref()
                    .is_some_and(|best| transition.priority <= best.priority)
                {
                    continue;
                }
                if !self.is_candidate(transition, active.id(), env, event.as_deref()) {
                    continue;
                }
                debug!(
                    source = %active.id(),
                    target = %transition.target,
                    priority = %transition.priority,
                    "candidate"
                );
                best = Some(Chosen {
                    source: active.id().clone(),
                    target: transition.target.clone(),
                    trigger: transition.trigger.clone(),
                    priority: transition.priority,
                });
            }
        }

        best
    }

    fn apply(&mut self, env: &Env<'_>, chosen: Chosen, tick: u64) {
        let from = self.active.last().map(|leaf| leaf.id().clone());
        env.log(&format!(
            "transition '{}' -> '{}' ({}, {})",
            chosen.source, chosen.target, chosen.trigger, chosen.priority
        ));

        let entered = self.activate(env, &chosen.target).is_ok();
        self.last_completed = None;
        self.last_status = Status::Running;
        self.stats.transitions += 1;

        self.history.record(TransitionRecord {
            tick,
            source: chosen.source,
            from,
            to: chosen.target,
            trigger: chosen.trigger,
            priority: chosen.priority,
            entered,
            timestamp: Utc::now(),
        });
    }
}

/// Hierarchical state machine driven by [`tick`](StateTree::tick).
///
/// One path of states, from a parentless root down to a leaf, is active at a
/// time. Each tick runs the tasks on that path, then applies up to
/// [`TreeConfig::max_transitions_per_tick`] transitions chosen by trigger,
/// conditions and priority.
///
/// All operations take `&self` and serialize on an internal lock, so a tree
/// can be shared between threads. The [`Context`] sits outside that lock:
/// tasks may call [`Context::send_event`] from inside a tick.
///
/// # Example
///
/// ```rust
/// use statetree::builder::{StateBuilder, TransitionBuilder};
/// use statetree::engine::StateTree;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = StateTree::builder()
///     .state(StateBuilder::new("Idle").transition(TransitionBuilder::new("Alert").on_event("Noise")))?
///     .state(StateBuilder::new("Alert"))?
///     .build();
///
/// tree.start("Idle")?;
/// tree.tick(0.016);
/// assert_eq!(tree.current_state().as_deref(), Some("Idle"));
///
/// tree.send_event("Noise");
/// tree.tick(0.016);
/// assert_eq!(tree.current_state().as_deref(), Some("Alert"));
/// # Ok(())
/// # }
/// ```
pub struct StateTree {
    id: Uuid,
    config: TreeConfig,
    context: Arc<Context>,
    sink: Arc<dyn LogSink>,
    runtime: Mutex<Runtime>,
}

impl StateTree {
    /// Create a stopped tree over `graph`.
    pub fn new(graph: StateGraph, config: TreeConfig, sink: Arc<dyn LogSink>) -> Self {
        let history = TransitionHistory::with_capacity(config.history_capacity);
        Self {
            id: Uuid::new_v4(),
            config,
            context: Arc::new(Context::new()),
            sink,
            runtime: Mutex::new(Runtime {
                graph,
                active: Vec::new(),
                current: None,
                last_completed: None,
                last_status: Status::Running,
                history,
                stats: TreeStats::default(),
            }),
        }
    }

    /// Start building a tree.
    pub fn builder() -> StateTreeBuilder {
        StateTreeBuilder::new()
    }

    /// Select and enter the path to `root`.
    ///
    /// A tree that is already running exits its current path first. If the
    /// path cannot be selected the tree is left without an active state.
    pub fn start(&self, root: impl Into<StateId>) -> Result<(), SelectionError> {
        let root = root.into();
        let span = info_span!("start", tree = %self.id, root = %root);
        let _guard = span.enter();

        let mut runtime = self.runtime.lock();
        let env = self.env();
        env.log(&format!("tree starting at '{root}'"));
        info!("starting");

        runtime.last_completed = None;
        runtime.last_status = Status::Running;
        if let Some(failed) = runtime.activate(&env, &root)? {
            runtime.last_completed = Some(failed);
            runtime.last_status = Status::Failed;
        }
        Ok(())
    }

    /// Advance the tree by one frame.
    ///
    /// Runs the task phase, then the transition phase, then clears the
    /// pending event whether or not anything consumed it. Ticking a tree that
    /// was never started only advances the counter.
    pub fn tick(&self, delta_time: f64) -> TickReport {
        let mut runtime = self.runtime.lock();
        runtime.stats.ticks += 1;
        let tick = runtime.stats.ticks;
        let span = info_span!("tick", tree = %self.id, tick);
        let _guard = span.enter();
        let env = self.env();

        runtime.run_tasks(&env, delta_time);

        let max = self.config.max_transitions_per_tick;
        let mut transitions = 0;
        while transitions < max {
            let Some(chosen) = runtime.arbitrate(&env) else {
                break;
            };
            runtime.apply(&env, chosen, tick);
            transitions += 1;
        }

        let saturated = max > 0 && transitions == max && runtime.arbitrate(&env).is_some();
        if saturated {
            runtime.stats.saturated_cascades += 1;
            warn!(transitions, "transition cascade hit its bound");
            env.log(&format!("transition cascade stopped after {transitions} transitions"));
        }

        self.context.clear_event();

        TickReport {
            tick,
            transitions,
            saturated,
        }
    }

    /// Set the pending event, replacing any event not yet consumed.
    ///
    /// Waits for an in-flight tick to finish. Task code running inside a
    /// tick should use [`Context::send_event`] instead.
    pub fn send_event(&self, name: impl Into<String>) {
        let _runtime = self.runtime.lock();
        self.context.send_event(name);
    }

    /// Shared handle to the tree's blackboard.
    pub fn context(&self) -> Arc<Context> {
        Arc::clone(&self.context)
    }

    /// Target of the last successful `start` or transition.
    ///
    /// This is the selected target, which may sit above the active leaf when
    /// selection resolved through children.
    pub fn current_state(&self) -> Option<StateId> {
        self.runtime.lock().current.clone()
    }

    /// Ids of the active path, root first.
    pub fn active_path(&self) -> Vec<StateId> {
        self.runtime
            .lock()
            .active
            .iter()
            .map(|state| state.id().clone())
            .collect()
    }

    /// Snapshot of the active path with per-task statuses.
    pub fn active_states(&self) -> Vec<ActiveState> {
        self.runtime.lock().active.clone()
    }

    /// State that completed during the last task phase, if any.
    pub fn last_completed_state(&self) -> Option<StateId> {
        self.runtime.lock().last_completed.clone()
    }

    /// Status recorded with [`last_completed_state`](Self::last_completed_state).
    pub fn last_status(&self) -> Status {
        self.runtime.lock().last_status
    }

    /// Whether a path is active.
    pub fn is_running(&self) -> bool {
        !self.runtime.lock().active.is_empty()
    }

    /// Snapshot of the transition history.
    pub fn history(&self) -> TransitionHistory {
        self.runtime.lock().history.clone()
    }

    /// Running counters.
    pub fn stats(&self) -> TreeStats {
        self.runtime.lock().stats
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.runtime.lock().stats.ticks
    }

    /// Instance id attached to every tracing span.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of published states.
    pub fn state_count(&self) -> usize {
        self.runtime.lock().graph.len()
    }

    /// Whether a state with this id was published.
    pub fn contains_state(&self, id: &str) -> bool {
        self.runtime.lock().graph.contains(id)
    }

    fn env(&self) -> Env<'_> {
        Env {
            ctx: &self.context,
            sink: self.sink.as_ref(),
        }
    }
}

impl std::fmt::Debug for StateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTree")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("current", &self.current_state())
            .finish()
    }
}
