#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

//! Building blocks: typed argument binding for rvt test steps.
//!
//! Blocks are registered into a [`Registry`] with a [`Signature`]. Each
//! parameter's [`ParamType`] is resolved to a [`Token`] once, at
//! registration. Binding runs those tokens over the raw arguments of a
//! [`Step`] and yields a [`BoundCall`] ready to run.
//!
//! ```
//! use rvt_blocks::{BlockResult, Handler, ParamType, Registry, Signature, Step};
//!
//! let mut registry = Registry::new();
//! let sig = Signature::new().positional("port", ParamType::Integer);
//! registry
//!     .register("Open", sig, Handler::building(|_| Ok(BlockResult::passed())))
//!     .unwrap();
//!
//! let step = Step::parse("Open 8080").unwrap();
//! let call = registry.bind_step(&step).unwrap();
//! assert_eq!(call.args()[0].as_number(), Some(8080.0));
//! ```

mod bind;
mod complete;
mod error;
mod registry;
pub mod resolve;
mod result;
mod signature;
mod step;
pub mod token;
mod value;

pub use bind::{BoundBlock, BoundCall, BoundSetup, bind_args, expand_setup};
pub use complete::{Completion, CompletionContext, complete};
pub use error::{BindError, BlockError, ConvertError, LineError, RegistrationError};
pub use registry::{BlockDef, BlockEntry, BlockKind, BuildingFn, Handler, Registry, SetupFn};
pub use result::{BlockResult, Cleanup, CleanupScope, IntoBlockResult, Outcome, cleanup_all};
pub use signature::{BlockParam, CustomToken, Param, ParamKind, ParamType, Signature, next_arg};
pub use step::{Expansion, IntoExpansion, Step, read_call};
pub use token::{AnyToken, ListToken, NumberToken, StringToken, Token};
pub use value::Value;
