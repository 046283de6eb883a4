//! Fatal errors raised by the rewrite.

use thiserror::Error;

/// An error that aborts the rewrite of a whole file.
///
/// Pattern mismatches never produce one of these; they leave the module
/// untouched instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The wrapped default export points at a declaration that has no
    /// expression form the wrapper could be applied to.
    #[error("node type {kind} not yet implemented: cannot rewrite `{name}` wrapped in `{wrapper}`")]
    UnsupportedWrappedDeclaration {
        name: String,
        kind: &'static str,
        wrapper: String,
    },
}
