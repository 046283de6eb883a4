//! Print a rewritten module by splicing changed items into the original text.
//!
//! Only top-level items that differ from the parsed module are printed. Every
//! other byte of the source, including blank lines and the comments around a
//! rewritten item, is copied as it was.
//!
//! Items are matched by span: the rewrite gives each replacement node the
//! span of the item it replaces. An original item with no counterpart was
//! deleted, together with the comments it owned. When the rewritten module
//! contains an item that matches nothing in the source (or `minify` is set)
//! the whole module is reprinted instead.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use anyhow::{Context, Result};
use swc_common::{comments::Comments, sync::Lrc, BytePos, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Module, ModuleItem};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

use crate::emit::{print_module, PrintOptions};
use crate::format::format_source;

/// One text edit on the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Print `rewritten`, reusing `source` for every item left untouched.
///
/// `original` is the module body as it was parsed from `source`; `comments`
/// is the store the rewrite ran against.
pub fn splice_module(
    source: &str,
    original: &[ModuleItem],
    rewritten: &Module,
    comments: &dyn Comments,
    source_map: Lrc<SourceMap>,
    options: &PrintOptions,
) -> Result<String> {
    let Some(edits) = plan_edits(source, original, rewritten, comments, &source_map, options)?
    else {
        let printed = print_module(rewritten, comments, source_map, options)?;
        return Ok(format_source(&printed, options));
    };

    let mut output = source.to_string();
    for edit in edits.into_iter().rev() {
        output.replace_range(edit.range, &edit.text);
    }

    let body = output.trim_end();
    if body.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{body}\n"))
}

/// Edits in source order, or `None` when the module has to be reprinted.
fn plan_edits(
    source: &str,
    original: &[ModuleItem],
    rewritten: &Module,
    comments: &dyn Comments,
    source_map: &Lrc<SourceMap>,
    options: &PrintOptions,
) -> Result<Option<Vec<Edit>>> {
    if options.minify {
        return Ok(None);
    }

    let known: HashSet<(BytePos, BytePos)> = original
        .iter()
        .map(|item| (item.span().lo, item.span().hi))
        .collect();
    let mut by_span = HashMap::with_capacity(rewritten.body.len());
    for item in &rewritten.body {
        let key = (item.span().lo, item.span().hi);
        if !known.contains(&key) || by_span.insert(key, item).is_some() {
            return Ok(None);
        }
    }

    let offset = |pos: BytePos| source_map.lookup_byte_offset(pos).pos.0 as usize;

    let mut edits = Vec::new();
    let mut gap_start = 0;
    for item in original {
        let span = item.span();
        let (lo, hi) = (offset(span.lo), offset(span.hi));

        match by_span.get(&(span.lo, span.hi)) {
            Some(&new) if new == item => {}
            Some(&new) => edits.push(Edit {
                range: lo..hi,
                text: print_item(new, comments, source_map.clone(), options)?,
            }),
            None => edits.push(Edit {
                range: deletion_range(source, gap_start, lo, hi),
                text: String::new(),
            }),
        }
        gap_start = hi;
    }

    Ok(Some(edits))
}

/// Print one item without the comments around it, which stay in the source.
fn print_item(
    item: &ModuleItem,
    comments: &dyn Comments,
    source_map: Lrc<SourceMap>,
    options: &PrintOptions,
) -> Result<String> {
    let span = item.span();
    comments.take_leading(span.lo);
    comments.take_trailing(span.hi);

    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_target(EsVersion::latest())
                .with_ascii_only(options.ascii_only)
                .with_omit_last_semi(options.omit_last_semi),
            cm: source_map,
            comments: Some(comments),
            wr: writer,
        };
        item.emit_with(&mut emitter)
            .context("failed to emit module item")?;
    }
    let printed = String::from_utf8(buf).context("codegen produced invalid UTF-8")?;

    Ok(format_source(&printed, options).trim_end().to_string())
}

/// Byte range to remove for a deleted item at `lo..hi`.
///
/// `gap_start` is where the previous item ends. Comments after the previous
/// item on its own line belong to it; the lines between there and the item
/// hold the item's leading comments, which go with it. Blank lines before
/// those comments are kept. A comment after the item on its last line goes
/// too, and so does the line itself when nothing else is left on it.
fn deletion_range(source: &str, gap_start: usize, lo: usize, hi: usize) -> Range<usize> {
    let gap = &source[gap_start..lo];
    let leading_from = if gap_start == 0 {
        Some(0)
    } else {
        end_of_first_line(gap)
    };

    let start = match leading_from {
        Some(from) => {
            let rest = &gap[from..];
            let first = from + (rest.len() - rest.trim_start().len());
            gap_start + gap[..first].rfind('\n').map_or(0, |nl| nl + 1)
        }
        None => lo,
    };

    let line_end = source[hi..].find('\n').map_or(source.len(), |n| hi + n);
    let owns_line = start == 0 || source[..start].ends_with('\n');
    let end = if owns_line && only_comments(&source[hi..line_end]) {
        (line_end + 1).min(source.len())
    } else {
        hi
    };

    start..end
}

/// Index just past the first newline of `gap` that is not inside a block
/// comment. `gap` holds only whitespace and comments.
fn end_of_first_line(gap: &str) -> Option<usize> {
    let mut i = 0;
    while i < gap.len() {
        let rest = &gap[i..];
        if rest.starts_with('\n') {
            return Some(i + 1);
        }
        if rest.starts_with("//") {
            return rest.find('\n').map(|nl| i + nl + 1);
        }
        if rest.starts_with("/*") {
            i += rest[2..].find("*/").map_or(rest.len(), |end| end + 4);
            continue;
        }
        i += rest.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Whether `text` is nothing but whitespace and comments closed on this line.
fn only_comments(text: &str) -> bool {
    let mut rest = text.trim();
    loop {
        if rest.is_empty() || rest.starts_with("//") {
            return true;
        }
        let Some(body) = rest.strip_prefix("/*") else {
            return false;
        };
        let Some(end) = body.find("*/") else {
            return false;
        };
        rest = body[end + 2..].trim_start();
    }
}
