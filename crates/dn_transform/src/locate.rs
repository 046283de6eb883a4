//! Cardinality-guarded lookups over a module's top-level items.

use dn_ast::{classify_default_export, declared_name, DeclKind, DefaultExportShape, WrapperCall};
use swc_ecma_ast::{Decl, Module, ModuleDecl, ModuleItem, Stmt};

/// Why a lookup did not produce exactly one match.
///
/// Both variants mean "skip this rewrite"; neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    NotFound,
    Ambiguous(usize),
}

/// A declaration found by [`locate_declaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    /// Index of the declaring statement in `Module::body`.
    pub index: usize,
    pub kind: DeclKind,
}

/// Collapse a list of matches to its single element.
pub fn exactly_one<T>(matches: Vec<T>) -> Result<T, Lookup> {
    let count = matches.len();
    let mut matches = matches.into_iter();
    match (matches.next(), count) {
        (Some(only), 1) => Ok(only),
        (None, _) => Err(Lookup::NotFound),
        (Some(_), n) => Err(Lookup::Ambiguous(n)),
    }
}

/// The top-level declaration of a module item, if it is one.
pub fn top_level_decl(item: &ModuleItem) -> Option<&Decl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(decl)) => Some(decl),
        _ => None,
    }
}

/// Find the unique top-level declaration binding `name`.
///
/// Categories are searched function, then variable, then class; the first
/// category with exactly one match wins. When no category has exactly one,
/// the result is `Ambiguous` if any category had several, else `NotFound`.
pub fn locate_declaration(module: &Module, name: &str) -> Result<Located, Lookup> {
    let mut ambiguous = None;

    for kind in DeclKind::SEARCH_ORDER {
        let hits: Vec<usize> = module
            .body
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                top_level_decl(item).and_then(declared_name) == Some((kind, name))
            })
            .map(|(index, _)| index)
            .collect();

        match exactly_one(hits) {
            Ok(index) => return Ok(Located { index, kind }),
            Err(Lookup::Ambiguous(n)) => {
                ambiguous.get_or_insert(n);
            }
            Err(Lookup::NotFound) => {}
        }
    }

    Err(ambiguous.map_or(Lookup::NotFound, Lookup::Ambiguous))
}

/// Every default export in the module with its classification.
pub fn default_exports(module: &Module, wrapper: &WrapperCall) -> Vec<(usize, DefaultExportShape)> {
    module
        .body
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            classify_default_export(item, wrapper).map(|shape| (index, shape))
        })
        .collect()
}

/// Whether a module item is any form of `export default`.
pub fn is_default_export(item: &ModuleItem) -> bool {
    matches!(
        item,
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(_) | ModuleDecl::ExportDefaultDecl(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse;

    fn locate(source: &str, name: &str) -> Result<Located, Lookup> {
        locate_declaration(&parse(source, "input.ts").module, name)
    }

    #[test]
    fn exactly_one_distinguishes_zero_one_many() {
        assert_eq!(exactly_one(Vec::<u8>::new()), Err(Lookup::NotFound));
        assert_eq!(exactly_one(vec![7]), Ok(7));
        assert_eq!(exactly_one(vec![7, 8, 9]), Err(Lookup::Ambiguous(3)));
    }

    #[test]
    fn finds_each_declaration_kind() {
        let source = "function f() { return 1; }\nconst v = 2;\nclass C {}\n";
        assert_eq!(
            locate(source, "f"),
            Ok(Located {
                index: 0,
                kind: DeclKind::Function
            })
        );
        assert_eq!(
            locate(source, "v"),
            Ok(Located {
                index: 1,
                kind: DeclKind::Variable
            })
        );
        assert_eq!(
            locate(source, "C"),
            Ok(Located {
                index: 2,
                kind: DeclKind::Class
            })
        );
        assert_eq!(locate(source, "missing"), Err(Lookup::NotFound));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        assert_eq!(
            locate("var Foo = 1;\nvar Foo = 2;\n", "Foo"),
            Err(Lookup::Ambiguous(2))
        );
    }

    #[test]
    fn function_category_wins_over_variable() {
        let source = "const Foo = 1;\nfunction Foo() { return 2; }\n";
        assert_eq!(
            locate(source, "Foo"),
            Ok(Located {
                index: 1,
                kind: DeclKind::Function
            })
        );
    }

    #[test]
    fn later_category_used_when_earlier_is_ambiguous() {
        let source = "var Foo = 1;\nvar Foo = 2;\nclass Foo {}\n";
        assert_eq!(
            locate(source, "Foo"),
            Ok(Located {
                index: 2,
                kind: DeclKind::Class
            })
        );
    }

    #[test]
    fn multi_declarator_variables_are_not_declarations() {
        assert_eq!(locate("let a = 1, b = 2;\n", "a"), Err(Lookup::NotFound));
        assert_eq!(locate("const { a } = obj;\n", "a"), Err(Lookup::NotFound));
    }

    #[test]
    fn nested_and_exported_declarations_are_ignored() {
        let source = "export function Foo() {}\nfunction outer() { function Bar() {} }\n";
        assert_eq!(locate(source, "Foo"), Err(Lookup::NotFound));
        assert_eq!(locate(source, "Bar"), Err(Lookup::NotFound));
    }

    #[test]
    fn default_exports_are_classified_in_order() {
        let parsed = parse("const a = 1;\nexport default a;\n", "input.ts");
        let exports = default_exports(&parsed.module, &WrapperCall::default());
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].0, 1);
        assert!(matches!(exports[0].1, DefaultExportShape::Identifier(_)));
        assert!(is_default_export(&parsed.module.body[1]));
        assert!(!is_default_export(&parsed.module.body[0]));
    }
}
