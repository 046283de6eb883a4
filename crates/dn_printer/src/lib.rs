//! Printer back end for defname.
//!
//! A rewritten module is printed against the source it was parsed from:
//!
//! 1. Splice: only items the rewrite changed are emitted with
//!    `swc_ecma_codegen`; everything else is copied from the source
//! 2. Format: emitted text is re-indented to the configured width
//!
//! `print_module` reprints a whole module and is the fallback when items
//! cannot be matched back to the source.

pub mod emit;
pub mod format;
pub mod splice;

pub use emit::{print_module, PrintOptions};
pub use format::format_source;
pub use splice::splice_module;
