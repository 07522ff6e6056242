//! Property-based tests for selection, arbitration and compilation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated trees.

use proptest::prelude::*;
use statetree::builder::{StateBuilder, StateTreeBuilder, TransitionBuilder};
use statetree::core::{Constant, Priority, SelectionBehavior, StateId};
use statetree::engine::TreeConfig;
use statetree::generator::{
    compile, Invocation, StateDescription, TransitionDescription, TreeDescription,
};
use statetree::StateTree;

/// A forest: `parents[i]` is `None` or an index below `i`.
#[derive(Clone, Debug)]
struct Forest {
    parents: Vec<Option<usize>>,
    selections: Vec<SelectionBehavior>,
}

impl Forest {
    fn len(&self) -> usize {
        self.parents.len()
    }

    fn children(&self, index: usize) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.parents[i] == Some(index))
            .collect()
    }

    fn roots(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.parents[i].is_none()).collect()
    }

    fn builder(&self, index: usize) -> StateBuilder {
        let mut state = StateBuilder::new(name(index)).selection(self.selections[index]);
        if let Some(parent) = self.parents[index] {
            state = state.parent(name(parent));
        }
        for child in self.children(index) {
            state = state.child(name(child));
        }
        state
    }
}

fn name(index: usize) -> String {
    format!("S{index}")
}

fn arbitrary_selection() -> impl Strategy<Value = SelectionBehavior> {
    prop_oneof![
        Just(SelectionBehavior::EnterState),
        Just(SelectionBehavior::ChildrenInOrder),
        Just(SelectionBehavior::ChildrenRandom),
    ]
}

fn arbitrary_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Normal),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

prop_compose! {
    fn arbitrary_forest()(size in 1..10usize)(
        seeds in prop::collection::vec(any::<u16>(), size),
        has_parent in prop::collection::vec(any::<bool>(), size),
        selections in prop::collection::vec(arbitrary_selection(), size),
    ) -> Forest {
        let parents = (0..seeds.len())
            .map(|i| (i > 0 && has_parent[i]).then(|| seeds[i] as usize % i))
            .collect();
        Forest { parents, selections }
    }
}

prop_compose! {
    fn arbitrary_description()(forest in arbitrary_forest())(
        kinds in prop::collection::vec("[a-z]{1,6}", forest.len()),
        values in prop::collection::vec(any::<i32>(), forest.len()),
        targets in prop::collection::vec(any::<u16>(), forest.len()),
        priorities in prop::collection::vec(arbitrary_priority(), forest.len()),
        forest in Just(forest),
    ) -> TreeDescription {
        let mut description = TreeDescription::new("generated");
        for i in 0..forest.len() {
            let mut state = StateDescription::new(name(i))
                .selection(forest.selections[i])
                .task(Invocation::new(kinds[i].clone(), serde_json::json!({ "n": values[i], "k": i })))
                .transition(
                    TransitionDescription::new(name(targets[i] as usize % (forest.len() + 1)))
                        .priority(priorities[i]),
                );
            if let Some(parent) = forest.parents[i] {
                state = state.parent(name(parent));
            }
            for child in forest.children(i) {
                state = state.child(name(child));
            }
            description = description.state(state);
        }
        description
    }
}

fn build(forest: &Forest) -> StateTree {
    (0..forest.len())
        .try_fold(StateTreeBuilder::new(), |tree, i| tree.state(forest.builder(i)))
        .unwrap()
        .build()
}

proptest! {
    #[test]
    fn started_path_satisfies_parent_invariant(forest in arbitrary_forest(), pick in any::<u16>()) {
        let tree = build(&forest);
        let target = pick as usize % forest.len();

        prop_assert!(tree.start(name(target)).is_ok());

        let path = tree.active_path();
        let first = path[0].as_str().trim_start_matches('S').parse::<usize>().unwrap();
        prop_assert_eq!(forest.parents[first], None);
        prop_assert!(path.contains(&StateId::from(name(target))));

        for pair in path.windows(2) {
            let parent = pair[0].as_str().trim_start_matches('S').parse::<usize>().unwrap();
            let child = pair[1].as_str().trim_start_matches('S').parse::<usize>().unwrap();
            prop_assert_eq!(forest.parents[child], Some(parent));
        }
    }

    #[test]
    fn starting_a_root_puts_it_first(forest in arbitrary_forest(), pick in any::<u16>()) {
        let tree = build(&forest);
        let roots = forest.roots();
        let root = roots[pick as usize % roots.len()];

        tree.start(name(root)).unwrap();

        let active = tree.active_path();
        prop_assert_eq!(active[0].as_str(), name(root));
        prop_assert_eq!(tree.current_state(), Some(StateId::from(name(root))));
    }

    #[test]
    fn closed_transitions_never_move_the_tree(
        forest in arbitrary_forest(),
        targets in prop::collection::vec(any::<u16>(), 10),
        ticks in 1..20usize,
    ) {
        let tree = (0..forest.len())
            .try_fold(StateTreeBuilder::new(), |tree, i| {
                let target = name(targets[i] as usize % forest.len());
                tree.state(
                    forest
                        .builder(i)
                        .transition(TransitionBuilder::new(target).condition(Constant(false))),
                )
            })
            .unwrap()
            .build();

        tree.start(name(0)).unwrap();
        let before = (tree.current_state(), tree.active_path());

        for _ in 0..ticks {
            prop_assert_eq!(tree.tick(0.016).transitions, 0);
        }
        prop_assert_eq!((tree.current_state(), tree.active_path()), before);
    }

    #[test]
    fn arbitration_prefers_strictly_higher_then_innermost(
        priorities in prop::collection::vec(arbitrary_priority(), 1..6),
    ) {
        // A chain L0 <- L1 <- ... where level i declares one transition to Ti.
        let depth = priorities.len();
        let mut tree = StateTreeBuilder::new();
        for (level, priority) in priorities.iter().enumerate() {
            let mut state = StateBuilder::new(format!("L{level}"))
                .transition(TransitionBuilder::new(format!("T{level}")).priority(*priority));
            if level > 0 {
                state = state.parent(format!("L{}", level - 1));
            }
            tree = tree.state(state).unwrap();
            tree = tree.state(StateBuilder::new(format!("T{level}"))).unwrap();
        }
        let tree = tree.build();

        let mut expected: Option<(usize, Priority)> = None;
        for level in (0..depth).rev() {
            if expected.map_or(true, |(_, best)| priorities[level] > best) {
                expected = Some((level, priorities[level]));
            }
        }
        let (winner, _) = expected.unwrap();

        tree.start(format!("L{}", depth - 1)).unwrap();
        tree.tick(0.016);

        prop_assert_eq!(tree.current_state(), Some(StateId::from(format!("T{winner}"))));
    }

    #[test]
    fn history_respects_capacity(capacity in 0..8usize, ticks in 0..30usize) {
        let tree = StateTreeBuilder::new()
            .state(StateBuilder::new("A").transition(TransitionBuilder::new("B")))
            .unwrap()
            .state(StateBuilder::new("B").transition(TransitionBuilder::new("A")))
            .unwrap()
            .config(TreeConfig { max_transitions_per_tick: 1, history_capacity: capacity })
            .build();

        tree.start("A").unwrap();
        for _ in 0..ticks {
            tree.tick(0.016);
        }

        prop_assert_eq!(tree.history().len(), ticks.min(capacity));
        prop_assert_eq!(tree.stats().transitions, ticks as u64);
    }

    #[test]
    fn compile_is_deterministic(description in arbitrary_description()) {
        let first = compile(&description).to_bytes().unwrap();
        let second = compile(&description.clone()).to_bytes().unwrap();
        prop_assert_eq!(&first, &second);

        let reparsed = TreeDescription::from_json(&description.to_json().unwrap()).unwrap();
        prop_assert_eq!(compile(&reparsed).to_bytes().unwrap(), first);
    }

    #[test]
    fn compiled_programs_keep_declaration_order(description in arbitrary_description()) {
        let program = compile(&description);

        prop_assert_eq!(program.states.len(), description.states.len());
        for (state, declared) in program.states.iter().zip(&description.states) {
            prop_assert_eq!(&state.id, &declared.id);
            prop_assert_eq!(state.children.len(), declared.children.len());
        }
        prop_assert!(program.symbols.len() <= description.states.len());
    }
}
