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

//! Reader for the rvt expression language.
//!
//! Text flows through a [`CharStream`] into the [`Reader`], which yields a
//! located [`SyntaxNode`] tree plus any [`ReadError`]s. [`locate`] maps an
//! editor cursor back onto that tree.
//!
//! ```
//! use rvt_core::{read, find_token, Depth, SyntaxNode};
//!
//! let out = read("(VerifyAccept 1 2)");
//! assert!(out.is_clean());
//!
//! let tree = out.node.unwrap();
//! let head = find_token(&tree, 0, 3, Depth::Limited(1)).unwrap();
//! assert_eq!(head.atom_text().as_deref(), Some("VerifyAccept"));
//! ```

pub mod config;
mod error;
mod locate;
mod node;
mod reader;
mod span;
mod stream;
pub mod traits;

pub use config::{ReaderConfig, RecursionGuard};
pub use error::{ReadError, ReadErrorKind, Unsupported};
pub use locate::{Depth, Located, find_token, locate};
pub use node::{ErrorNode, Seq, StringLit, Symbol, SyntaxNode};
pub use reader::{ReadOutput, Reader, read, read_token, read_with_config};
pub use span::{Position, Range};
pub use stream::{CharStream, Character};
pub use traits::{Printer, SourcePrinter, ToSource};
