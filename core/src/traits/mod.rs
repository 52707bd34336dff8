//! Printing traits.
//!
//! ```text
//! ToSource (node -> text)
//!     └── Printer (buffer + spacing)
//! ```

mod printer;
mod to_source;

pub use printer::{Printer, SourcePrinter};
pub use to_source::ToSource;
