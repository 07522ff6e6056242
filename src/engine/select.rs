//! Path selection.
//!
//! Selecting a target builds the root-to-target path, checks every state's
//! enter conditions along it, and, when the target resolves through its
//! children, recurses into the first child whose own selection succeeds. The
//! resulting path is only handed back on full success; nothing is committed
//! on failure.

use crate::context::Context;
use crate::core::{test_all, StateId};
use crate::engine::{ActiveState, SelectionError, StateGraph};
use tracing::debug;

/// Resolve the active path for `target`.
///
/// The returned path may end below `target` when it selects children.
pub(crate) fn select(
    graph: &StateGraph,
    ctx: &Context,
    target: &StateId,
) -> Result<Vec<ActiveState>, SelectionError> {
    select_at_depth(graph, ctx, target, 0)
}

fn select_at_depth(
    graph: &StateGraph,
    ctx: &Context,
    target: &StateId,
    depth: usize,
) -> Result<Vec<ActiveState>, SelectionError> {
    if depth > graph.len() {
        return Err(SelectionError::Cycle {
            state: target.clone(),
        });
    }

    let mut path = Vec::new();
    for id in graph.path_to(target)? {
        let Some(definition) = graph.get(&id) else {
            return Err(SelectionError::UnresolvableTarget {
                target: target.clone(),
                missing: id,
            });
        };
        if !test_all(&definition.enter_conditions, ctx) {
            debug!(state = %id, "enter conditions failed");
            return Err(SelectionError::SelectionFailed { state: id });
        }
        path.push(ActiveState::new(id, definition.tasks.len()));
    }

    let Some(definition) = graph.get(target) else {
        return Err(SelectionError::UnresolvableTarget {
            target: target.clone(),
            missing: target.clone(),
        });
    };
    if definition.children.is_empty() || !definition.selection.selects_children() {
        return Ok(path);
    }

    // ChildrenRandom is resolved in declared order as well.
    for child in &definition.children {
        if !graph.can_select(child, ctx) {
            continue;
        }
        match select_at_depth(graph, ctx, child, depth + 1) {
            Ok(path) => return Ok(path),
            Err(err @ SelectionError::Cycle { .. }) => return Err(err),
            Err(err) => debug!(child = %child, %err, "child rejected"),
        }
    }

    Err(SelectionError::NoSelectableChild {
        state: target.clone(),
    })
}
