#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Attribute macros for declaring rvt blocks.
//!
//! Both macros leave the annotated function untouched and add a companion
//! `<name>_block()` returning a `BlockDef` for `Registry::add`. Parameter
//! tokens come from each argument's `BlockParam` implementation.
//!
//! ```ignore
//! use rvt::{building_block, Registry};
//!
//! #[building_block]
//! fn VerifyAccept(code: i64) -> bool {
//!     code == 200
//! }
//!
//! let mut registry = Registry::new();
//! registry.add(VerifyAccept_block())?;
//! ```
use proc_macro::TokenStream;
use syn::{ItemFn, parse_macro_input};

mod block;

use block::{BlockArgs, BlockKind};

/// Declares a building block.
///
/// The block is registered under the function name unless
/// `#[building_block(name = "...")]` overrides it. The function may return
/// `BlockResult`, `bool`, `()` or a `Result` of those.
#[proc_macro_attribute]
pub fn building_block(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as BlockArgs);
    let item = parse_macro_input!(item as ItemFn);
    block::expand(args, item, BlockKind::Building)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declares a setup block.
///
/// The first parameter receives the pending steps of the test case, the
/// rest are bound from arguments. The function returns the derived step
/// lists, either directly or in a `Result`.
///
/// ```ignore
/// #[setup_block]
/// fn EachPort(steps: Vec<Step>, ports: Vec<i64>) -> Vec<Vec<Step>> {
///     ports.iter().map(|p| with_port(&steps, *p)).collect()
/// }
/// ```
#[proc_macro_attribute]
pub fn setup_block(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as BlockArgs);
    let item = parse_macro_input!(item as ItemFn);
    block::expand(args, item, BlockKind::Setup)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
