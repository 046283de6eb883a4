use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use swc_common::{comments::Comments, sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

/// Print options forwarded from the caller to codegen and the format pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintOptions {
    /// Spaces per indentation level in the final output.
    pub indent_width: usize,
    pub minify: bool,
    pub ascii_only: bool,
    pub omit_last_semi: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            minify: false,
            ascii_only: false,
            omit_last_semi: false,
        }
    }
}

/// Emit `module` as source text, including the comments still attached in
/// `comments`.
///
/// Codegen takes each comment out of the store as it prints it, so a store
/// can only be printed once.
pub fn print_module(
    module: &Module,
    comments: &dyn Comments,
    source_map: Lrc<SourceMap>,
    options: &PrintOptions,
) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_target(EsVersion::latest())
                .with_minify(options.minify)
                .with_ascii_only(options.ascii_only)
                .with_omit_last_semi(options.omit_last_semi),
            cm: source_map,
            comments: Some(comments),
            wr: writer,
        };
        module
            .emit_with(&mut emitter)
            .context("failed to emit module")?;
    }

    String::from_utf8(buf).context("codegen produced invalid UTF-8")
}
