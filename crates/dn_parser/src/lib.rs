//! Parser front end for defname.
//!
//! Wraps the standard SWC parser so the rewrite gets a module together with
//! the comment store and source map the printer needs later. TypeScript files
//! are parsed with TypeScript syntax (JSX only for `.tsx`); JavaScript files
//! are parsed as ECMAScript with JSX always enabled.

pub mod parse;

pub use parse::{parse_module, syntax_for, ParsedModule};
