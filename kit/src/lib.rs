#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! rvt: reader, block registry and argument binder for line-oriented test
//! steps.
//!
//! This crate re-exports [`rvt_core`] (reading and cursor lookup),
//! [`rvt_blocks`] (registration, binding, results, autocomplete) and the
//! block attribute macros.
pub use rvt_blocks::*;
pub use rvt_core::*;
pub use rvt_macros::*;
