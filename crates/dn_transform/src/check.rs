//! Consistency check for default exports that survived the rewrite.

use swc_common::Spanned;
use swc_ecma_ast::Module;

use crate::locate::{exactly_one, is_default_export};
use crate::transform::Context;

/// Record a diagnostic if exactly one default export is left in the module.
///
/// Runs after the converters; it never changes the module.
pub(crate) fn check_remaining_default_export(module: &Module, cx: &mut Context<'_>) {
    let remaining: Vec<_> = module
        .body
        .iter()
        .filter(|item| is_default_export(item))
        .collect();

    if let Ok(item) = exactly_one(remaining) {
        cx.diagnostics.unmodified_default_export(item.span());
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::rewrite;
    use crate::DiagnosticKind;

    #[test]
    fn default_class_export_is_reported() {
        let result = rewrite("export default class Store {}\n", "Store.ts");
        assert_eq!(result.kinds(), vec![DiagnosticKind::UnmodifiedDefaultExport]);
        assert_eq!(
            result.diagnostics[0].to_string(),
            "WARNING: Unmodified \"export default\" found in file Store.ts!"
        );
    }

    #[test]
    fn converted_module_is_not_reported() {
        let result = rewrite("const a = 1;\nexport default a;\n", "a.ts");
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn diagnostic_points_at_surviving_export() {
        let result = rewrite("const a = 1;\nexport default a + 1;\n", "a.ts");
        let span = result.diagnostics[0].span;
        assert!(!span.is_dummy());
        assert!(span.hi > span.lo);
    }
}
