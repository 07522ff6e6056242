//! Arena of state definitions keyed by id.

use crate::builder::BuildError;
use crate::context::Context;
use crate::core::{test_all, StateDefinition, StateId};
use crate::engine::SelectionError;
use std::collections::HashMap;

/// Build-once, read-many collection of state definitions.
///
/// Parent and child links are ids resolved through this map, so a graph can
/// hold dangling references or cycles; those only fail when a path through
/// them is selected.
#[derive(Debug, Default)]
pub struct StateGraph {
    states: HashMap<StateId, StateDefinition>,
}

impl StateGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a definition. Ids are unique; a second definition with the same
    /// id is rejected and the first one is kept.
    pub fn insert(&mut self, definition: StateDefinition) -> Result<(), BuildError> {
        if self.states.contains_key(&definition.id) {
            return Err(BuildError::DuplicateState {
                id: definition.id.clone(),
            });
        }
        self.states.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Look up a state definition by id.
    pub fn get(&self, id: &str) -> Option<&StateDefinition> {
        self.states.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut StateDefinition> {
        self.states.get_mut(id)
    }

    /// Whether a state with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the graph has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> Vec<&StateId> {
        let mut ids: Vec<_> = self.states.keys().collect();
        ids.sort();
        ids
    }

    /// A state can be selected as a transition target when it exists and its
    /// own enter conditions hold. Ancestors and children are not consulted.
    pub fn can_select(&self, id: &str, ctx: &Context) -> bool {
        self.get(id)
            .is_some_and(|definition| test_all(&definition.enter_conditions, ctx))
    }

    /// Ids from the parentless ancestor of `target` down to `target`.
    pub fn path_to(&self, target: &StateId) -> Result<Vec<StateId>, SelectionError> {
        let mut path = Vec::new();
        let mut current = target.clone();

        loop {
            let Some(definition) = self.get(&current) else {
                return Err(SelectionError::UnresolvableTarget {
                    target: target.clone(),
                    missing: current,
                });
            };
            if path.len() > self.states.len() {
                return Err(SelectionError::Cycle {
                    state: target.clone(),
                });
            }
            path.push(current);
            match &definition.parent {
                Some(parent) => current = parent.clone(),
                None => break,
            }
        }

        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateBuilder;
    use crate::core::Constant;

    fn graph(states: Vec<StateBuilder>) -> StateGraph {
        let mut graph = StateGraph::new();
        for state in states {
            graph.insert(state.build().unwrap()).unwrap();
        }
        graph
    }

    #[test]
    fn path_runs_from_root_to_target() {
        let graph = graph(vec![
            StateBuilder::new("Root"),
            StateBuilder::new("Combat").parent("Root"),
            StateBuilder::new("Melee").parent("Combat"),
        ]);

        let path = graph.path_to(&StateId::from("Melee")).unwrap();
        assert_eq!(path, ["Root", "Combat", "Melee"]);
    }

    #[test]
    fn missing_ancestor_is_unresolvable() {
        let graph = graph(vec![StateBuilder::new("Leaf").parent("Ghost")]);

        let err = graph.path_to(&StateId::from("Leaf")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnresolvableTarget {
                target: StateId::from("Leaf"),
                missing: StateId::from("Ghost"),
            }
        );

        let err = graph.path_to(&StateId::from("Nowhere")).unwrap_err();
        assert_eq!(err.state(), &StateId::from("Nowhere"));
    }

    #[test]
    fn parent_cycle_is_detected() {
        let graph = graph(vec![
            StateBuilder::new("A").parent("B"),
            StateBuilder::new("B").parent("A"),
        ]);

        let err = graph.path_to(&StateId::from("A")).unwrap_err();
        assert!(matches!(err, SelectionError::Cycle { .. }));
    }

    #[test]
    fn duplicate_insert_keeps_first_definition() {
        let mut graph = StateGraph::new();
        graph
            .insert(StateBuilder::new("A").child("X").build().unwrap())
            .unwrap();

        let err = graph.insert(StateBuilder::new("A").build().unwrap());
        assert!(matches!(err, Err(BuildError::DuplicateState { .. })));
        assert_eq!(graph.get("A").map(|d| d.children().len()), Some(1));
    }

    #[test]
    fn can_select_checks_only_own_conditions() {
        let ctx = Context::new();
        let graph = graph(vec![
            StateBuilder::new("Vault").enter_condition(Constant(false)),
            StateBuilder::new("Gold").parent("Vault"),
        ]);

        assert!(!graph.can_select("Vault", &ctx));
        assert!(graph.can_select("Gold", &ctx));
        assert!(!graph.can_select("Missing", &ctx));
    }

    #[test]
    fn ids_are_sorted() {
        let graph = graph(vec![StateBuilder::new("b"), StateBuilder::new("a")]);
        assert_eq!(graph.ids(), vec![&StateId::from("a"), &StateId::from("b")]);
    }
}
