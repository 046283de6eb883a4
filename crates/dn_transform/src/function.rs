//! `export default function foo() {}` → `export function foo() {}`.

use dn_ast::DefaultExportShape;
use swc_ecma_ast::{
    Decl, DefaultDecl, ExportDecl, ExportDefaultDecl, FnDecl, FnExpr, Module, ModuleDecl,
    ModuleItem,
};
use tracing::debug;

use crate::locate::{default_exports, exactly_one};
use crate::transform::Context;

/// Run the stage. Returns whether the module changed.
pub(crate) fn convert_function_export(module: &mut Module, cx: &mut Context<'_>) -> bool {
    let candidates: Vec<_> = default_exports(module, &cx.config.wrapper)
        .into_iter()
        .filter_map(|(index, shape)| match shape {
            DefaultExportShape::FunctionDecl(ident) => Some((index, ident)),
            _ => None,
        })
        .collect();

    let (index, ident) = match exactly_one(candidates) {
        Ok(found) => found,
        Err(lookup) => {
            debug!(?lookup, "no single named default function export");
            return false;
        }
    };

    let ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
        span,
        decl: DefaultDecl::Fn(FnExpr { function, .. }),
    })) = &module.body[index]
    else {
        return false;
    };

    // Same span as the statement it replaces, so its comments carry over.
    let export = ExportDecl {
        span: *span,
        decl: Decl::Fn(FnDecl {
            ident: ident.clone(),
            declare: false,
            function: function.clone(),
        }),
    };
    module.body[index] = ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export));

    cx.diagnostics.check_filename(&ident.sym, ident.span);

    debug!(name = %ident.sym, "default function exported by name");
    true
}
