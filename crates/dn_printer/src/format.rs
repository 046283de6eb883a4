//! Text-level formatting pass run over codegen output.
//!
//! Codegen indents with four spaces and may leave trailing blank lines. This
//! pass rewrites the indentation of every line that starts in code to
//! `indent_width` spaces per level and ends the text with a single newline.
//! Lines that start inside a template literal, block comment or string are
//! left byte-for-byte as they are. Regex literals are skipped so a quote or
//! backtick inside one is not mistaken for the start of a string.

use crate::emit::PrintOptions;

mod scan;

use scan::{skip_non_code, HandleResult, Region, TemplateState};

/// Indentation unit used by `swc_ecma_codegen`'s `JsWriter`.
const CODEGEN_INDENT: usize = 4;

/// Format codegen output according to `options`.
pub fn format_source(source: &str, options: &PrintOptions) -> String {
    let body = source.trim_end_matches(['\n', ' ']);
    if body.is_empty() {
        return String::new();
    }

    if options.minify || options.indent_width == CODEGEN_INDENT {
        return format!("{body}\n");
    }

    let chars: Vec<char> = body.chars().collect();
    let code_starts = code_line_starts(&chars);

    let mut result = String::with_capacity(body.len());
    for (line_idx, line) in body.split('\n').enumerate() {
        if line_idx > 0 {
            result.push('\n');
        }
        if code_starts.get(line_idx).copied().unwrap_or(true) {
            reindent(line, options.indent_width, &mut result);
        } else {
            result.push_str(line);
        }
    }
    result.push('\n');
    result
}

/// For every line of `chars`, whether it starts in code (as opposed to
/// inside a template literal, block comment or string).
fn code_line_starts(chars: &[char]) -> Vec<bool> {
    let mut starts = vec![true];
    let mut template = TemplateState::new();
    let mut i = 0;

    while i < chars.len() {
        match template.handle_char(chars, i) {
            HandleResult::Skip(n) => {
                // Template handling only consumes literal text and delimiters.
                let end = (i + n).min(chars.len());
                let newlines = chars[i..end].iter().filter(|&&c| c == '\n').count();
                starts.extend(std::iter::repeat(false).take(newlines));
                i = end;
                continue;
            }
            HandleResult::Process => {}
        }

        if let Some((end, region)) = skip_non_code(chars, i) {
            for &c in &chars[i..end] {
                if c == '\n' {
                    starts.push(region == Region::LineComment);
                }
            }
            i = end;
            continue;
        }

        if chars[i] == '\n' {
            starts.push(true);
        }
        i += 1;
    }

    starts
}

fn reindent(line: &str, indent_width: usize, out: &mut String) {
    let content = line.trim_start_matches(' ');
    let leading = line.len() - content.len();
    let width = (leading / CODEGEN_INDENT) * indent_width + leading % CODEGEN_INDENT;
    out.extend(std::iter::repeat(' ').take(width));
    out.push_str(content);
}
