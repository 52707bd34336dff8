//! Block registry.
//!
//! A [`Registry`] is filled once at startup and then only read. Each name may
//! carry several overloads; binding tries them in registration order and
//! takes the first whose tokens consume the arguments exactly.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::bind::{BoundBlock, BoundCall, BoundSetup, bind_args};
use crate::error::{BindError, BlockError, RegistrationError};
use crate::resolve::resolve_param;
use crate::result::BlockResult;
use crate::signature::{Param, Signature};
use crate::step::{Expansion, Step};
use crate::token::Token;
use crate::value::Value;

pub type BuildingFn = dyn Fn(Vec<Value>) -> Result<BlockResult, BlockError> + Send + Sync;
pub type SetupFn = dyn Fn(Vec<Step>, Vec<Value>) -> Result<Expansion, BlockError> + Send + Sync;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Performs an action and reports a [`BlockResult`].
    Building,
    /// Rewrites the steps of a test case.
    Setup,
}

/// The code behind a block.
#[derive(Clone)]
pub enum Handler {
    Building(Arc<BuildingFn>),
    Setup(Arc<SetupFn>),
}

impl Handler {
    pub fn building(
        f: impl Fn(Vec<Value>) -> Result<BlockResult, BlockError> + Send + Sync + 'static,
    ) -> Self {
        Self::Building(Arc::new(f))
    }

    pub fn setup(
        f: impl Fn(Vec<Step>, Vec<Value>) -> Result<Expansion, BlockError> + Send + Sync + 'static,
    ) -> Self {
        Self::Setup(Arc::new(f))
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Building(_) => BlockKind::Building,
            Self::Setup(_) => BlockKind::Setup,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{:?}", self.kind())
    }
}

/// A block ready to be registered.
///
/// The block attribute macros generate a function returning one of these.
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    pub signature: Signature,
    pub handler: Handler,
}

impl BlockDef {
    pub fn building(
        name: impl Into<String>,
        signature: Signature,
        f: impl Fn(Vec<Value>) -> Result<BlockResult, BlockError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            signature,
            handler: Handler::building(f),
        }
    }

    pub fn setup(
        name: impl Into<String>,
        signature: Signature,
        f: impl Fn(Vec<Step>, Vec<Value>) -> Result<Expansion, BlockError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            signature,
            handler: Handler::setup(f),
        }
    }
}

/// One registered overload.
#[derive(Debug)]
pub struct BlockEntry {
    signature: Signature,
    tokens: Vec<Box<dyn Token>>,
    handler: Handler,
}

impl BlockEntry {
    pub fn kind(&self) -> BlockKind {
        self.handler.kind()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Tokens for the bindable parameters, in order.
    pub fn tokens(&self) -> &[Box<dyn Token>] {
        &self.tokens
    }

    fn bind(&self, name: &str, args: &[Value]) -> Option<BoundCall> {
        let parsed = bind_args(&self.tokens, args)?;
        let name = name.to_string();
        Some(match &self.handler {
            Handler::Building(handler) => BoundCall::Building(BoundBlock {
                name,
                handler: Arc::clone(handler),
                args: parsed,
            }),
            Handler::Setup(handler) => BoundCall::Setup(BoundSetup {
                name,
                handler: Arc::clone(handler),
                args: parsed,
            }),
        })
    }
}

/// Registered blocks by name.
#[derive(Debug, Default)]
pub struct Registry {
    blocks: BTreeMap<String, Vec<BlockEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload of `name`.
    ///
    /// Fails when the signature has a keyword-only parameter without a
    /// default, a bindable parameter with no token, or (for setup blocks) a
    /// first parameter that is not a list.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        signature: Signature,
        handler: Handler,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        let tokens = match build_tokens(&name, &signature, handler.kind()) {
            Ok(tokens) => tokens,
            Err(error) => {
                debug!(block = %name, %error, "rejected block");
                return Err(error);
            }
        };

        debug!(block = %name, kind = ?handler.kind(), arity = tokens.len(), "registered block");
        self.blocks.entry(name).or_default().push(BlockEntry {
            signature,
            tokens,
            handler,
        });
        Ok(())
    }

    pub fn add(&mut self, def: BlockDef) -> Result<(), RegistrationError> {
        self.register(def.name, def.signature, def.handler)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Overloads of `name` in registration order.
    pub fn overloads(&self, name: &str) -> &[BlockEntry] {
        self.blocks.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Bind raw text arguments to the first overload of `name` that accepts
    /// them.
    pub fn bind<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<BoundCall, BindError> {
        let values: Vec<Value> = args.iter().map(|a| Value::from(a.as_ref())).collect();
        self.bind_values(name, &values)
    }

    pub fn bind_values(&self, name: &str, args: &[Value]) -> Result<BoundCall, BindError> {
        let Some(entries) = self.blocks.get(name) else {
            debug!(block = name, "unknown block");
            return Err(BindError::UnknownBlock {
                name: name.to_string(),
            });
        };

        for (overload, entry) in entries.iter().enumerate() {
            trace!(block = name, overload, arity = entry.tokens.len(), "trying overload");
            if let Some(call) = entry.bind(name, args) {
                return Ok(call);
            }
        }

        debug!(block = name, args = args.len(), "no overload matched");
        Err(BindError::NoMatch {
            name: name.to_string(),
            args: args.len(),
        })
    }

    pub fn bind_step(&self, step: &Step) -> Result<BoundCall, BindError> {
        self.bind_values(&step.name, &step.values())
    }
}

fn build_tokens(
    block: &str,
    signature: &Signature,
    kind: BlockKind,
) -> Result<Vec<Box<dyn Token>>, RegistrationError> {
    if let Some(param) = signature.required_keyword_only().next() {
        return Err(RegistrationError::KeywordOnlyWithoutDefault {
            block: block.to_string(),
            param: param.name.clone(),
        });
    }

    let mut params = signature.positional_params();
    if kind == BlockKind::Setup {
        // the pending steps fill the first parameter, not an argument
        let takes_steps = params
            .next()
            .and_then(|p| p.ty.as_ref())
            .is_some_and(|ty| ty.is_list());
        if !takes_steps {
            return Err(RegistrationError::SetupRequiresList {
                block: block.to_string(),
            });
        }
    }

    params.map(|param| token_for(block, param)).collect()
}

fn token_for(block: &str, param: &Param) -> Result<Box<dyn Token>, RegistrationError> {
    resolve_param(param).ok_or_else(|| RegistrationError::UnresolvedParam {
        block: block.to_string(),
        param: param.name.clone(),
    })
}
