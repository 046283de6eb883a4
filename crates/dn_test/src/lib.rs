//! Shared pipeline driver for the golden-file and roundtrip tests.
//!
//! Runs the same steps as the `defname transform` command: parse, rewrite,
//! splice the changed items back into the source.

use anyhow::Result;
use dn_ast::TransformConfig;
use dn_parser::parse_module;
use dn_printer::{splice_module, PrintOptions};
use dn_transform::{default_to_named, Diagnostic};

/// Rewritten source plus the diagnostics produced along the way.
pub struct PipelineOutput {
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn run_pipeline(source: &str, filename: &str) -> Result<PipelineOutput> {
    let parsed = parse_module(source, filename)?;
    let original = parsed.module.body.clone();
    let output = default_to_named(
        parsed.module,
        &parsed.comments,
        filename,
        &TransformConfig::default(),
    )?;

    let printed = splice_module(
        source,
        &original,
        &output.module,
        &parsed.comments,
        parsed.source_map,
        &PrintOptions::default(),
    )?;

    Ok(PipelineOutput {
        source: printed,
        diagnostics: output.diagnostics,
    })
}

/// Check that `source` parses as a module.
pub fn verify_parses(source: &str, filename: &str) -> Result<()> {
    parse_module(source, filename)?;
    Ok(())
}
