//! Top-level rewrite entry point.
//!
//! Takes a parsed module and runs every stage over it in a fixed order,
//! since later stages look at what earlier ones produced (the wrapped-export
//! stage leaves an `export default Foo` behind for the identifier stage).

use dn_ast::TransformConfig;
use swc_common::comments::Comments;
use swc_ecma_ast::Module;

use crate::check::check_remaining_default_export;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::TransformError;
use crate::function::convert_function_export;
use crate::identifier::convert_identifier_export;
use crate::imports::normalize_imports;
use crate::wrapped::convert_wrapped_export;

/// The rewritten module plus everything worth telling the user about it.
#[derive(Debug)]
pub struct TransformOutput {
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

/// State threaded through the stages of one rewrite.
pub(crate) struct Context<'a> {
    pub config: &'a TransformConfig,
    pub comments: &'a dyn Comments,
    pub diagnostics: Diagnostics,
}

/// Rewrite default exports in `module` into named exports.
///
/// `comments` must be the store the module was parsed with; comments move
/// with the nodes they belong to. `file` is only used for diagnostics.
pub fn default_to_named(
    mut module: Module,
    comments: &dyn Comments,
    file: &str,
    config: &TransformConfig,
) -> Result<TransformOutput, TransformError> {
    let mut cx = Context {
        config,
        comments,
        diagnostics: Diagnostics::new(file),
    };

    let wrapped = convert_wrapped_export(&mut module, &mut cx)?;
    let identifier = convert_identifier_export(&mut module, &mut cx);
    let function = convert_function_export(&mut module, &mut cx);
    check_remaining_default_export(&module, &mut cx);
    let imports = normalize_imports(&mut module);

    if wrapped || identifier || function || imports > 0 {
        tracing::info!(
            file = cx.diagnostics.file(),
            wrapped,
            identifier,
            function,
            imports,
            "rewrote module"
        );
    }

    Ok(TransformOutput {
        module,
        diagnostics: cx.diagnostics.into_records(),
    })
}
