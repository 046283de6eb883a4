//! Comment ownership across node replacement.
//!
//! SWC keeps comments outside the tree, keyed by byte position: a node owns
//! the leading comments at `span.lo` and the trailing comments at `span.hi`.
//! A replacement node built with the replaced node's span therefore inherits
//! its comments; any node nested inside the replacement that still carries
//! the old span has to be detached so the comments print exactly once.

use swc_common::{comments::Comments, Span, Spanned, DUMMY_SP};
use swc_ecma_ast::{Expr, ModuleDecl, ModuleItem};

/// Clear the position of an expression lifted out of a declaration, so the
/// declaration's comments belong only to the statement that replaced it.
pub(crate) fn detach(expr: &mut Expr) {
    match expr {
        Expr::Fn(f) => f.function.span = DUMMY_SP,
        Expr::Class(c) => c.class.span = DUMMY_SP,
        _ => {}
    }
}

/// Remove the comments owned by a node that is being deleted.
///
/// Returns whether anything was dropped.
pub(crate) fn drop_attached(comments: &dyn Comments, span: Span) -> bool {
    let leading = comments
        .take_leading(span.lo)
        .is_some_and(|c| !c.is_empty());
    let trailing = comments
        .take_trailing(span.hi)
        .is_some_and(|c| !c.is_empty());
    leading || trailing
}

/// Remove every comment owned by a deleted `export default` item: those
/// around the statement and those around the exported expression.
///
/// Returns whether anything was dropped.
pub(crate) fn drop_owned_by_export(comments: &dyn Comments, item: &ModuleItem) -> bool {
    let outer = drop_attached(comments, item.span());
    let inner = match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            drop_attached(comments, export.expr.span())
        }
        _ => false,
    };
    outer || inner
}
