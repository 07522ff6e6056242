//! Turning a program into a running tree.
//!
//! Linking resolves every invocation against a [`Registry`] and collects all
//! failures before anything is published. The linked states are then fed to
//! a [`StateTreeBuilder`] in declaration order, so an instantiated program is
//! the same interpreted engine a hand-built tree runs on.

use crate::builder::{StateBuilder, StateTreeBuilder, TransitionBuilder};
use crate::core::{Condition, StateId, Task};
use crate::engine::{StateTree, TreeConfig};
use crate::generator::{
    GeneratorError, LinkError, NodeRef, ProgramInvocation, ProgramState, Registry, TreeProgram,
};
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type LinkCheck = Validation<(), NonEmptyVec<LinkError>>;

/// Collects link failures while states are assembled.
struct Linker<'a> {
    program: &'a TreeProgram,
    registry: &'a Registry,
    checks: Vec<LinkCheck>,
}

impl<'a> Linker<'a> {
    fn fail(&mut self, error: LinkError) {
        self.checks.push(Validation::fail(error));
    }

    fn node(&mut self, state: &StateId, node: &NodeRef) -> Option<StateId> {
        let program = self.program;
        match node {
            NodeRef::Missing(id) => Some(id.clone()),
            NodeRef::Index(index) => match program.states.get(*index as usize) {
                Some(target) => Some(target.id.clone()),
                None => {
                    self.fail(LinkError::BadReference {
                        state: state.to_string(),
                        index: *index,
                    });
                    None
                }
            },
        }
    }

    /// Symbol name and decoded parameters of an invocation.
    fn decode(
        &mut self,
        state: &StateId,
        invocation: &ProgramInvocation,
    ) -> Option<(&'a str, Value)> {
        let program = self.program;
        let Some(kind) = program.symbol(invocation.symbol) else {
            self.fail(LinkError::BadSymbol {
                state: state.to_string(),
                symbol: invocation.symbol,
            });
            return None;
        };
        match serde_json::from_str(&invocation.params) {
            Ok(params) => Some((kind, params)),
            Err(e) => {
                self.fail(LinkError::InvalidParams {
                    state: state.to_string(),
                    kind: kind.to_owned(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn task(
        &mut self,
        state: &StateId,
        invocation: &ProgramInvocation,
    ) -> Option<Box<dyn Task>> {
        let (kind, params) = self.decode(state, invocation)?;
        match self.registry.build_task(kind, &params) {
            Some(Ok(task)) => Some(task),
            Some(Err(reason)) => {
                self.fail(LinkError::InvalidParams {
                    state: state.to_string(),
                    kind: kind.to_owned(),
                    reason,
                });
                None
            }
            None => {
                self.fail(LinkError::UnknownTask {
                    state: state.to_string(),
                    kind: kind.to_owned(),
                });
                None
            }
        }
    }

    fn condition(
        &mut self,
        state: &StateId,
        invocation: &ProgramInvocation,
    ) -> Option<Box<dyn Condition>> {
        let (kind, params) = self.decode(state, invocation)?;
        match self.registry.build_condition(kind, &params) {
            Some(Ok(condition)) => Some(condition),
            Some(Err(reason)) => {
                self.fail(LinkError::InvalidParams {
                    state: state.to_string(),
                    kind: kind.to_owned(),
                    reason,
                });
                None
            }
            None => {
                self.fail(LinkError::UnknownCondition {
                    state: state.to_string(),
                    kind: kind.to_owned(),
                });
                None
            }
        }
    }

    fn state(&mut self, state: &ProgramState) -> StateBuilder {
        let id = &state.id;
        let mut builder = StateBuilder::new(id.clone()).selection(state.selection);

        if let Some(parent) = &state.parent {
            if let Some(parent) = self.node(id, parent) {
                builder = builder.parent(parent);
            }
        }
        for child in &state.children {
            if let Some(child) = self.node(id, child) {
                builder = builder.child(child);
            }
        }
        for invocation in &state.tasks {
            if let Some(task) = self.task(id, invocation) {
                builder = builder.boxed_task(task);
            }
        }
        for invocation in &state.enter_conditions {
            if let Some(condition) = self.condition(id, invocation) {
                builder = builder.boxed_enter_condition(condition);
            }
        }
        for transition in &state.transitions {
            let Some(target) = self.node(id, &transition.target) else {
                continue;
            };
            let mut linked = TransitionBuilder::new(target)
                .trigger(transition.trigger.clone())
                .priority(transition.priority);
            for invocation in &transition.conditions {
                if let Some(condition) = self.condition(id, invocation) {
                    linked = linked.boxed_condition(condition);
                }
            }
            builder = builder.transition(linked);
        }

        builder
    }
}

impl TreeProgram {
    /// Link against `registry` and build a tree with `config`.
    ///
    /// Fails with [`GeneratorError::Link`] listing every unresolved kind,
    /// symbol or parameter set, or with [`GeneratorError::Build`] when the
    /// builder rejects a state (for example a duplicated id). Dangling state
    /// references and cycles are not errors here; they fail at selection.
    pub fn instantiate(
        &self,
        registry: &Registry,
        config: TreeConfig,
    ) -> Result<StateTree, GeneratorError> {
        let builder = StateTreeBuilder::new().config(config);
        Ok(self.instantiate_into(registry, builder)?.build())
    }

    /// Link against `registry` and publish the states into `builder`.
    ///
    /// Useful to pick a log sink before building.
    pub fn instantiate_into(
        &self,
        registry: &Registry,
        builder: StateTreeBuilder,
    ) -> Result<StateTreeBuilder, GeneratorError> {
        let states = self.link(registry)?;
        Ok(builder.states(states)?)
    }

    fn link(&self, registry: &Registry) -> Result<Vec<StateBuilder>, GeneratorError> {
        let mut linker = Linker {
            program: self,
            registry,
            checks: Vec::new(),
        };
        let states: Vec<StateBuilder> = self.states.iter().map(|s| linker.state(s)).collect();

        match Validation::all_vec(linker.checks) {
            Validation::Failure(errors) => {
                Err(GeneratorError::Link(errors.iter().cloned().collect()))
            }
            Validation::Success(_) => Ok(states),
        }
    }
}
