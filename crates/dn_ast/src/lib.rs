//! Typed views over the ECMAScript/TypeScript module AST for defname.
//!
//! Re-exports the standard SWC AST and adds the closed sum types the
//! rewrite dispatches on:
//! - [`DefaultExportShape`]: what an `export default ...` item looks like
//! - [`DeclKind`]: which kind of top-level declaration binds a name
//! - [`WrapperCall`]: the `Namespace.method(...)` pair recognised as a wrapper

pub use swc_ecma_ast::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swc_common::DUMMY_SP;

/// Kind of top-level declaration the locator can bind a name to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Function,
    Variable,
    Class,
}

impl DeclKind {
    /// Search order used by the declaration locator.
    pub const SEARCH_ORDER: [DeclKind; 3] = [DeclKind::Function, DeclKind::Variable, DeclKind::Class];
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Function => write!(f, "FunctionDeclaration"),
            DeclKind::Variable => write!(f, "VariableDeclaration"),
            DeclKind::Class => write!(f, "ClassDeclaration"),
        }
    }
}

/// Return the kind and bound name of a declaration the locator understands.
///
/// Variable declarations only count when they have exactly one declarator
/// whose pattern is a plain identifier.
pub fn declared_name(decl: &Decl) -> Option<(DeclKind, &str)> {
    match decl {
        Decl::Fn(f) => Some((DeclKind::Function, &*f.ident.sym)),
        Decl::Class(c) => Some((DeclKind::Class, &*c.ident.sym)),
        Decl::Var(v) => match v.decls.as_slice() {
            [VarDeclarator {
                name: Pat::Ident(binding),
                ..
            }] => Some((DeclKind::Variable, &*binding.id.sym)),
            _ => None,
        },
        _ => None,
    }
}

/// A `Namespace.method` pair such as `Scrivito.connect`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WrapperCall {
    pub namespace: String,
    pub method: String,
}

impl Default for WrapperCall {
    fn default() -> Self {
        Self {
            namespace: "Scrivito".to_string(),
            method: "connect".to_string(),
        }
    }
}

impl WrapperCall {
    /// Whether `callee` is exactly `<namespace>.<method>`.
    pub fn matches(&self, callee: &Callee) -> bool {
        let Callee::Expr(expr) = callee else {
            return false;
        };
        let Expr::Member(member) = &**expr else {
            return false;
        };
        let (Expr::Ident(object), MemberProp::Ident(property)) = (&*member.obj, &member.prop) else {
            return false;
        };
        &*object.sym == self.namespace.as_str() && &*property.sym == self.method.as_str()
    }

    /// Build a fresh `<namespace>.<method>` callee expression.
    pub fn callee(&self) -> Callee {
        Callee::Expr(Box::new(Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(Expr::Ident(Ident::new_no_ctxt(
                self.namespace.as_str().into(),
                DUMMY_SP,
            ))),
            prop: MemberProp::Ident(IdentName::new(self.method.as_str().into(), DUMMY_SP)),
        })))
    }
}

impl fmt::Display for WrapperCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.method)
    }
}

impl FromStr for WrapperCall {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, method) = s
            .split_once('.')
            .ok_or_else(|| format!("expected `Namespace.method`, got `{s}`"))?;
        let is_ident = |part: &str| {
            !part.is_empty()
                && !part.starts_with(|c: char| c.is_ascii_digit())
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        };
        if !is_ident(namespace) || !is_ident(method) {
            return Err(format!("`{s}` is not of the form `Namespace.method`"));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            method: method.to_string(),
        })
    }
}

/// Options controlling which patterns the rewrite recognises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub wrapper: WrapperCall,
}

/// Classification of an `export default ...` module item.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExportShape {
    /// `export default Namespace.method(...)` with the configured wrapper.
    ///
    /// `argument` is set only when the call has exactly one argument and
    /// that argument is a plain identifier.
    CallWrapper { argument: Option<Ident> },
    /// `export default Name`
    Identifier(Ident),
    /// `export default function name(...) {...}`
    FunctionDecl(Ident),
    /// Any other default export (anonymous function, class, expression, ...).
    Unsupported,
}

/// Classify a module item. Returns `None` when the item is not a default export.
pub fn classify_default_export(item: &ModuleItem, wrapper: &WrapperCall) -> Option<DefaultExportShape> {
    let ModuleItem::ModuleDecl(decl) = item else {
        return None;
    };

    let shape = match decl {
        ModuleDecl::ExportDefaultExpr(export) => match &*export.expr {
            Expr::Ident(ident) => DefaultExportShape::Identifier(ident.clone()),
            Expr::Call(call) if wrapper.matches(&call.callee) => {
                let argument = match call.args.as_slice() {
                    [ExprOrSpread { spread: None, expr }] => match &**expr {
                        Expr::Ident(ident) => Some(ident.clone()),
                        _ => None,
                    },
                    _ => None,
                };
                DefaultExportShape::CallWrapper { argument }
            }
            _ => DefaultExportShape::Unsupported,
        },
        ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
            DefaultDecl::Fn(FnExpr {
                ident: Some(ident), ..
            }) => DefaultExportShape::FunctionDecl(ident.clone()),
            _ => DefaultExportShape::Unsupported,
        },
        _ => return None,
    };

    Some(shape)
}
