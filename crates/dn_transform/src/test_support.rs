//! Shared helpers for unit tests: parse, run the rewrite, print.

use dn_ast::TransformConfig;
use dn_parser::{parse_module, ParsedModule};
use dn_printer::{splice_module, PrintOptions};

use crate::{default_to_named, Diagnostic, DiagnosticKind, TransformError};

pub(crate) fn parse(source: &str, filename: &str) -> ParsedModule {
    parse_module(source, filename).expect("test input must parse")
}

/// Output of running the whole rewrite over a source string.
pub(crate) struct Rewritten {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rewritten {
    pub(crate) fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.iter().map(|d| d.kind).collect()
    }
}

pub(crate) fn try_rewrite(source: &str, filename: &str) -> Result<Rewritten, TransformError> {
    let parsed = parse(source, filename);
    let original = parsed.module.body.clone();
    let result = default_to_named(
        parsed.module,
        &parsed.comments,
        filename,
        &TransformConfig::default(),
    )?;
    let output = splice_module(
        source,
        &original,
        &result.module,
        &parsed.comments,
        parsed.source_map,
        &PrintOptions::default(),
    )
    .expect("rewritten module must print");
    Ok(Rewritten {
        output,
        diagnostics: result.diagnostics,
    })
}

pub(crate) fn rewrite(source: &str, filename: &str) -> Rewritten {
    try_rewrite(source, filename).expect("rewrite must not fail")
}
