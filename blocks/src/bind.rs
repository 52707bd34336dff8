//! Binding raw arguments to a block's tokens.

use core::fmt;
use std::sync::Arc;

use crate::error::BlockError;
use crate::registry::{BlockKind, BuildingFn, SetupFn};
use crate::result::BlockResult;
use crate::step::{Expansion, Step};
use crate::token::Token;
use crate::value::Value;

/// Run `tokens` over `args` in order.
///
/// Each token sees the suffix the previous one left. Binding fails when the
/// arguments run out before the tokens do, when any token rejects, or when
/// arguments are left over.
pub fn bind_args(tokens: &[Box<dyn Token>], args: &[Value]) -> Option<Vec<Value>> {
    let mut parsed = Vec::with_capacity(tokens.len());
    let mut rest = args;
    for token in tokens {
        if rest.is_empty() {
            return None;
        }
        let (value, remaining) = token.parse(rest)?;
        parsed.push(value);
        rest = remaining;
    }
    rest.is_empty().then_some(parsed)
}

/// A building block with its arguments applied.
#[derive(Clone)]
pub struct BoundBlock {
    pub(crate) name: String,
    pub(crate) handler: Arc<BuildingFn>,
    pub(crate) args: Vec<Value>,
}

impl BoundBlock {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn call(&self) -> Result<BlockResult, BlockError> {
        (self.handler)(self.args.clone())
    }
}

/// A setup block with its arguments applied, waiting for the steps it
/// transforms.
#[derive(Clone)]
pub struct BoundSetup {
    pub(crate) name: String,
    pub(crate) handler: Arc<SetupFn>,
    pub(crate) args: Vec<Value>,
}

impl BoundSetup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn expand(&self, steps: Vec<Step>) -> Result<Expansion, BlockError> {
        (self.handler)(steps, self.args.clone())
    }
}

/// Result of a successful bind.
#[derive(Clone, Debug)]
pub enum BoundCall {
    Building(BoundBlock),
    Setup(BoundSetup),
}

impl BoundCall {
    pub fn name(&self) -> &str {
        match self {
            Self::Building(b) => b.name(),
            Self::Setup(s) => s.name(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Building(_) => BlockKind::Building,
            Self::Setup(_) => BlockKind::Setup,
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            Self::Building(b) => b.args(),
            Self::Setup(s) => s.args(),
        }
    }

    pub fn into_building(self) -> Option<BoundBlock> {
        match self {
            Self::Building(b) => Some(b),
            Self::Setup(_) => None,
        }
    }

    pub fn into_setup(self) -> Option<BoundSetup> {
        match self {
            Self::Setup(s) => Some(s),
            Self::Building(_) => None,
        }
    }
}

impl fmt::Debug for BoundBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundBlock")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for BoundSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundSetup")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Apply setup calls in order to the steps of one test case.
///
/// Each setup maps every step list produced so far to one or more new lists,
/// so two setups yielding two variants each give four cases.
pub fn expand_setup(setups: &[BoundSetup], steps: Vec<Step>) -> Result<Expansion, BlockError> {
    let mut cases = vec![steps];
    for setup in setups {
        let mut next = Vec::new();
        for case in cases {
            next.extend(setup.expand(case)?);
        }
        cases = next;
    }
    Ok(cases)
}
