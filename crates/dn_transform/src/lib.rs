//! Rewrite pass that turns default exports into named exports.
//!
//! Stages, run in this order over one module:
//! - `export default NS.method(Foo)` → `const Foo = NS.method(<Foo as expression>)`
//!   and `export default Foo`
//! - `export default Foo`            → `export <declaration of Foo>`
//! - `export default function foo()` → `export function foo()`
//! - consistency check for a surviving default export
//! - `import Foo from "./foo"`       → `import { Foo } from "./foo"`

mod check;
mod comments;
pub mod diagnostics;
pub mod error;
mod function;
mod identifier;
pub mod imports;
pub mod locate;
pub mod transform;
mod wrapped;

#[cfg(test)]
mod test_support;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::TransformError;
pub use transform::{default_to_named, TransformOutput};
