//! `export default Foo` → `export <declaration of Foo>`.

use dn_ast::{DeclKind, DefaultExportShape};
use swc_common::Spanned;
use swc_ecma_ast::{ExportDecl, Module, ModuleDecl, ModuleItem};
use tracing::debug;

use crate::comments;
use crate::locate::{default_exports, exactly_one, locate_declaration, top_level_decl};
use crate::transform::Context;

/// Run the stage. Returns whether the module changed.
pub(crate) fn convert_identifier_export(module: &mut Module, cx: &mut Context<'_>) -> bool {
    let candidates: Vec<_> = default_exports(module, &cx.config.wrapper)
        .into_iter()
        .filter_map(|(index, shape)| match shape {
            DefaultExportShape::Identifier(ident) => Some((index, ident)),
            _ => None,
        })
        .collect();

    let (export_index, ident) = match exactly_one(candidates) {
        Ok(found) => found,
        Err(lookup) => {
            debug!(?lookup, "no single identifier default export");
            return false;
        }
    };

    let located = match locate_declaration(module, &ident.sym) {
        Ok(located) => located,
        Err(lookup) => {
            debug!(name = %ident.sym, ?lookup, "exported identifier has no unique declaration");
            return false;
        }
    };
    let Some(decl) = top_level_decl(&module.body[located.index]) else {
        return false;
    };

    // The export takes the declaration's span, and with it its comments.
    let export = ExportDecl {
        span: decl.span(),
        decl: decl.clone(),
    };
    module.body[located.index] = ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export));

    let removed = module.body.remove(export_index);
    if comments::drop_owned_by_export(cx.comments, &removed) {
        cx.diagnostics.dropped_comment(removed.span());
    }

    if located.kind == DeclKind::Function {
        cx.diagnostics.check_filename(&ident.sym, ident.span);
    }

    debug!(name = %ident.sym, kind = %located.kind, "declaration exported by name");
    true
}
