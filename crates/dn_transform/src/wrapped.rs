//! `export default NS.method(Foo)` → `const Foo = NS.method(<Foo as expression>)`.
//!
//! The declaration of `Foo` is lifted into the wrapper call as an expression
//! and replaced by a `const` binding of the same name; the default export is
//! kept and now exports that binding.

use dn_ast::DefaultExportShape;
use swc_common::{Spanned, SyntaxContext, DUMMY_SP};
use swc_ecma_ast as ast;
use tracing::debug;

use crate::comments;
use crate::error::TransformError;
use crate::locate::{default_exports, exactly_one, locate_declaration, top_level_decl};
use crate::transform::Context;

/// Run the stage. Returns whether the module changed.
pub(crate) fn convert_wrapped_export(
    module: &mut ast::Module,
    cx: &mut Context<'_>,
) -> Result<bool, TransformError> {
    let wrapper = &cx.config.wrapper;
    let candidates: Vec<_> = default_exports(module, wrapper)
        .into_iter()
        .filter_map(|(index, shape)| match shape {
            DefaultExportShape::CallWrapper { argument } => Some((index, argument)),
            _ => None,
        })
        .collect();

    let (export_index, argument) = match exactly_one(candidates) {
        Ok(found) => found,
        Err(lookup) => {
            debug!(?lookup, %wrapper, "no single wrapped default export");
            return Ok(false);
        }
    };
    let Some(ident) = argument else {
        debug!(%wrapper, "wrapped default export does not wrap a single identifier");
        return Ok(false);
    };

    let located = match locate_declaration(module, &ident.sym) {
        Ok(located) => located,
        Err(lookup) => {
            debug!(name = %ident.sym, ?lookup, "wrapped identifier has no unique declaration");
            return Ok(false);
        }
    };
    let Some(decl) = top_level_decl(&module.body[located.index]) else {
        return Ok(false);
    };

    if !has_expression_form(decl) {
        debug!(name = %ident.sym, "wrapped declaration is abstract or ambient");
        return Ok(false);
    }

    let span = decl.span();
    let mut expr = declaration_to_expr(decl).map_err(|kind| {
        TransformError::UnsupportedWrappedDeclaration {
            name: ident.sym.to_string(),
            kind,
            wrapper: wrapper.to_string(),
        }
    })?;
    comments::detach(&mut expr);

    let call = ast::Expr::Call(ast::CallExpr {
        span: DUMMY_SP,
        callee: wrapper.callee(),
        args: vec![ast::ExprOrSpread {
            spread: None,
            expr: Box::new(expr),
        }],
        ..Default::default()
    });
    let binding = ast::VarDecl {
        span,
        ctxt: SyntaxContext::empty(),
        kind: ast::VarDeclKind::Const,
        declare: false,
        decls: vec![ast::VarDeclarator {
            span: DUMMY_SP,
            name: ast::Pat::Ident(ident.clone().into()),
            init: Some(Box::new(call)),
            definite: false,
        }],
    };
    module.body[located.index] =
        ast::ModuleItem::Stmt(ast::Stmt::Decl(ast::Decl::Var(Box::new(binding))));

    if let ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportDefaultExpr(export)) =
        &mut module.body[export_index]
    {
        export.expr = Box::new(ast::Expr::Ident(ident.clone()));
    }

    debug!(name = %ident.sym, kind = %located.kind, "wrapped declaration bound to const");
    Ok(true)
}

/// Abstract classes and ambient (`declare`, bodiless) declarations have no
/// valid expression form; the stage leaves them alone.
fn has_expression_form(decl: &ast::Decl) -> bool {
    match decl {
        ast::Decl::Class(c) => !c.declare && !c.class.is_abstract,
        ast::Decl::Fn(f) => !f.declare && f.function.body.is_some(),
        _ => true,
    }
}

/// Turn a function or class declaration into the equivalent named expression.
///
/// Any other declaration has no expression form; its node type is returned
/// as the error value.
fn declaration_to_expr(decl: &ast::Decl) -> Result<ast::Expr, &'static str> {
    match decl {
        ast::Decl::Fn(f) => Ok(ast::Expr::Fn(ast::FnExpr {
            ident: Some(f.ident.clone()),
            function: f.function.clone(),
        })),
        ast::Decl::Class(c) => Ok(ast::Expr::Class(ast::ClassExpr {
            ident: Some(c.ident.clone()),
            class: c.class.clone(),
        })),
        ast::Decl::Var(_) => Err("VariableDeclaration"),
        _ => Err("Declaration"),
    }
}
