//! Compiled tree programs.
//!
//! [`compile`] lowers a [`TreeDescription`] into a [`TreeProgram`]: state
//! references become indices, factory names are interned, parameters become
//! canonical JSON text. The result is a pure function of the description, so
//! its encoded bytes are stable for identical input.

use crate::core::{Priority, SelectionBehavior, StateId, Trigger};
use crate::generator::{GeneratorError, Invocation, TreeDescription};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current program format version.
pub const PROGRAM_VERSION: u32 = 1;

/// A state reference after lowering.
///
/// Ids that no state declares are kept as `Missing`; they fail only when a
/// path through them is selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    Index(u32),
    Missing(StateId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInvocation {
    /// Index into [`TreeProgram::symbols`].
    pub symbol: u32,
    /// Parameters as canonical JSON text.
    pub params: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramTransition {
    pub target: NodeRef,
    pub trigger: Trigger,
    pub priority: Priority,
    pub conditions: Vec<ProgramInvocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramState {
    pub id: StateId,
    pub parent: Option<NodeRef>,
    pub children: Vec<NodeRef>,
    pub selection: SelectionBehavior,
    pub tasks: Vec<ProgramInvocation>,
    pub enter_conditions: Vec<ProgramInvocation>,
    pub transitions: Vec<ProgramTransition>,
}

/// Realizable form of a tree description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeProgram {
    pub version: u32,
    pub name: String,
    /// Task and condition kinds in first-use order.
    pub symbols: Vec<String>,
    /// States in declaration order.
    pub states: Vec<ProgramState>,
}

impl TreeProgram {
    /// Name of an interned symbol.
    pub fn symbol(&self, symbol: u32) -> Option<&str> {
        self.symbols.get(symbol as usize).map(String::as_str)
    }

    /// Id a reference points at, or `None` for an index outside the program.
    pub fn resolve<'a>(&'a self, node: &'a NodeRef) -> Option<&'a StateId> {
        match node {
            NodeRef::Index(index) => self.states.get(*index as usize).map(|state| &state.id),
            NodeRef::Missing(id) => Some(id),
        }
    }

    /// Encode the program with its version.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GeneratorError> {
        bincode::serialize(self).map_err(|e| GeneratorError::Encode(e.to_string()))
    }

    /// Decode a program, rejecting other versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GeneratorError> {
        let program: Self =
            bincode::deserialize(bytes).map_err(|e| GeneratorError::Decode(e.to_string()))?;
        if program.version != PROGRAM_VERSION {
            return Err(GeneratorError::UnsupportedVersion {
                found: program.version,
                supported: PROGRAM_VERSION,
            });
        }
        Ok(program)
    }
}

/// Interns kind names and maps ids to declaration indices.
struct Lowering<'a> {
    indices: HashMap<&'a StateId, u32>,
    symbols: Vec<String>,
    symbol_indices: HashMap<String, u32>,
}

impl<'a> Lowering<'a> {
    fn new(description: &'a TreeDescription) -> Self {
        let mut indices = HashMap::new();
        for (index, state) in description.states.iter().enumerate() {
            // The first declaration of a duplicated id owns the index.
            if let Ok(index) = u32::try_from(index) {
                indices.entry(&state.id).or_insert(index);
            }
        }
        Self {
            indices,
            symbols: Vec::new(),
            symbol_indices: HashMap::new(),
        }
    }

    fn node(&self, id: &StateId) -> NodeRef {
        match self.indices.get(id) {
            Some(index) => NodeRef::Index(*index),
            None => NodeRef::Missing(id.clone()),
        }
    }

    fn intern(&mut self, kind: &str) -> u32 {
        if let Some(symbol) = self.symbol_indices.get(kind) {
            return *symbol;
        }
        let Ok(symbol) = u32::try_from(self.symbols.len()) else {
            // Symbol space is exhausted.
            return u32::MAX;
        };
        self.symbols.push(kind.to_owned());
        self.symbol_indices.insert(kind.to_owned(), symbol);
        symbol
    }

    fn invocation(&mut self, invocation: &Invocation) -> ProgramInvocation {
        ProgramInvocation {
            symbol: self.intern(&invocation.kind),
            // serde_json maps keep keys sorted, so this text is canonical.
            params: invocation.params.to_string(),
        }
    }

    fn invocations(&mut self, invocations: &[Invocation]) -> Vec<ProgramInvocation> {
        invocations.iter().map(|i| self.invocation(i)).collect()
    }
}

/// Lower a description into a program.
///
/// No validation happens here: dangling references, cycles and duplicate ids
/// all compile, and surface when the program is instantiated or run.
///
/// # Example
///
/// ```rust
/// use statetree::generator::{compile, Invocation, NodeRef, StateDescription, TreeDescription};
///
/// let description = TreeDescription::new("demo")
///     .state(StateDescription::new("Root").child("Leaf"))
///     .state(StateDescription::new("Leaf").parent("Root").task(Invocation::bare("wait")));
///
/// let program = compile(&description);
/// assert_eq!(program.states[0].children, vec![NodeRef::Index(1)]);
/// assert_eq!(program.symbols, vec!["wait".to_string()]);
/// assert_eq!(program.to_bytes().unwrap(), compile(&description).to_bytes().unwrap());
/// ```
pub fn compile(description: &TreeDescription) -> TreeProgram {
    let mut lowering = Lowering::new(description);

    let states = description
        .states
        .iter()
        .map(|state| ProgramState {
            id: state.id.clone(),
            parent: state.parent.as_ref().map(|parent| lowering.node(parent)),
            children: state.children.iter().map(|child| lowering.node(child)).collect(),
            selection: state.selection,
            tasks: lowering.invocations(&state.tasks),
            enter_conditions: lowering.invocations(&state.enter_conditions),
            transitions: state
                .transitions
                .iter()
                .map(|transition| ProgramTransition {
                    target: lowering.node(&transition.target),
                    trigger: transition.trigger.clone(),
                    priority: transition.priority,
                    conditions: lowering.invocations(&transition.conditions),
                })
                .collect(),
        })
        .collect();

    TreeProgram {
        version: PROGRAM_VERSION,
        name: description.name.clone(),
        symbols: lowering.symbols,
        states,
    }
}
