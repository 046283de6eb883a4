//! `import Foo from "./foo"` → `import { Foo } from "./foo"`.
//!
//! A relative, extensionless source is assumed to name a sibling module that
//! this same rewrite has already converted to named exports.

use swc_ecma_ast::{
    ImportDefaultSpecifier, ImportNamedSpecifier, ImportPhase, ImportSpecifier, Module, ModuleDecl,
    ModuleItem,
};
use tracing::debug;

/// Rewrite eligible default imports. Returns how many imports changed.
pub(crate) fn normalize_imports(module: &mut Module) -> usize {
    let mut rewritten = 0;

    for item in &mut module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        // `import source x` and `import defer x` bind no default export.
        if import.phase != ImportPhase::Evaluation
            || !matches!(import.specifiers.as_slice(), [ImportSpecifier::Default(_)])
        {
            continue;
        }
        // `raw` keeps the source's quotes; printing it back preserves them.
        let eligible = import
            .src
            .raw
            .as_deref()
            .map(|raw| raw.trim_matches(['"', '\'']))
            .is_some_and(is_extensionless_relative);
        if !eligible {
            continue;
        }

        import.specifiers = std::mem::take(&mut import.specifiers)
            .into_iter()
            .map(to_named_specifier)
            .collect();
        rewritten += 1;
    }

    debug!(rewritten, "normalized relative default imports");
    rewritten
}

fn to_named_specifier(specifier: ImportSpecifier) -> ImportSpecifier {
    match specifier {
        ImportSpecifier::Default(ImportDefaultSpecifier { span, local }) => {
            ImportSpecifier::Named(ImportNamedSpecifier {
                span,
                local,
                imported: None,
                is_type_only: false,
            })
        }
        other => other,
    }
}

/// Whether an import source is relative and has no trailing extension.
///
/// An extension is a final `.` followed by one or more word characters.
pub fn is_extensionless_relative(source: &str) -> bool {
    source.starts_with('.') && !has_extension(source)
}

fn has_extension(source: &str) -> bool {
    source.rsplit_once('.').is_some_and(|(_, ext)| {
        !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
