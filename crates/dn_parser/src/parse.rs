use anyhow::Result;
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};

/// Result of parsing one source file.
pub struct ParsedModule {
    pub module: swc_ecma_ast::Module,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Pick the parser syntax for a file path.
///
/// JavaScript files (`.js`, `.jsx`, `.mjs`, `.cjs`) are parsed as ECMAScript
/// with JSX enabled; everything else as TypeScript, with JSX for `.tsx`.
pub fn syntax_for(filename: &str) -> Syntax {
    let is_js = [".js", ".jsx", ".mjs", ".cjs"]
        .iter()
        .any(|ext| filename.ends_with(ext));
    if is_js {
        return Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        });
    }
    Syntax::Typescript(TsSyntax {
        tsx: filename.ends_with(".tsx"),
        decorators: true,
        ..Default::default()
    })
}

/// Parse a source string as an ES module.
///
/// Syntax errors are rendered to stderr through SWC's diagnostic handler and
/// returned as an error naming the file.
pub fn parse_module(source: &str, filename: &str) -> Result<ParsedModule> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax_for(filename),
        EsVersion::latest(),
        Some(&comments),
        &mut vec![],
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    Ok(ParsedModule {
        module,
        comments,
        source_map,
    })
}
