//! Character scanning helpers shared by the formatting pass.

/// Skip over non-code regions: comments, strings and regex literals (NOT
/// template literals).
///
/// Template literals contain `${...}` interpolations with real code, so
/// callers handle them separately using `TemplateState`.
///
/// Returns `Some((new_position, region))` if `i` is at the start of a
/// non-code region, where `new_position` is the first character after it.
pub(super) fn skip_non_code(chars: &[char], i: usize) -> Option<(usize, Region)> {
    if i >= chars.len() {
        return None;
    }

    // Single-line comment, including its terminating newline.
    if chars[i] == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
        let mut j = i + 2;
        while j < chars.len() && chars[j] != '\n' {
            j += 1;
        }
        return Some(((j + 1).min(chars.len()), Region::LineComment));
    }

    if chars[i] == '/' && i + 1 < chars.len() && chars[i + 1] == '*' {
        let mut j = i + 2;
        while j + 1 < chars.len() {
            if chars[j] == '*' && chars[j + 1] == '/' {
                return Some((j + 2, Region::Opaque));
            }
            j += 1;
        }
        return Some((chars.len(), Region::Opaque));
    }

    if chars[i] == '/' && regex_allowed(chars, i) {
        if let Some(end) = regex_end(chars, i) {
            return Some((end, Region::Opaque));
        }
    }

    // Plain strings end at the closing quote or, for unterminated quotes such
    // as apostrophes in JSX text, at the end of the line.
    if chars[i] == '"' || chars[i] == '\'' {
        let quote = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] != quote && chars[j] != '\n' {
            if chars[j] == '\\' {
                j += 1;
            }
            j += 1;
        }
        let end = if j < chars.len() && chars[j] == quote { j + 1 } else { j };
        return Some((end.min(chars.len()), Region::Opaque));
    }

    None
}

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

/// Whether a `/` at `i` is in expression position, judged by the previous
/// significant character.
fn regex_allowed(chars: &[char], i: usize) -> bool {
    let mut j = i;
    while j > 0 && chars[j - 1].is_whitespace() {
        j -= 1;
    }
    if j == 0 {
        return true;
    }

    let prev = chars[j - 1];
    if "(,=:[!&|?{};+-*%<>~^".contains(prev) {
        return true;
    }
    if !(prev.is_ascii_alphanumeric() || prev == '_' || prev == '$') {
        return false;
    }

    let mut start = j;
    while start > 0 && (chars[start - 1].is_ascii_alphanumeric() || chars[start - 1] == '_' || chars[start - 1] == '$') {
        start -= 1;
    }
    let word: String = chars[start..j].iter().collect();
    REGEX_KEYWORDS.contains(&word.as_str())
}

/// End of a regex literal starting at `i`, flags included. `None` when the
/// literal does not close on its line.
fn regex_end(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i + 1;
    let mut in_class = false;
    while j < chars.len() {
        match chars[j] {
            '\n' => return None,
            '\\' => j += 1,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                j += 1;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                return Some(j);
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Kind of region skipped by [`skip_non_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Region {
    /// A `//` comment; the line after it starts in code.
    LineComment,
    /// A block comment or string; lines starting inside it are kept verbatim.
    Opaque,
}

/// State for tracking template literal nesting.
///
/// Each entry in the stack represents a template literal, with the value being
/// the brace depth within that literal's current interpolation:
/// - `0` = in the literal part (between `` ` `` and `${`, or between `}` and `${`/`` ` ``)
/// - `> 0` = inside an interpolation with that brace depth
#[derive(Default)]
pub(super) struct TemplateState {
    stack: Vec<i32>,
}

impl TemplateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a character and report whether template handling consumed it.
    pub fn handle_char(&mut self, chars: &[char], i: usize) -> HandleResult {
        let Some(&depth) = self.stack.last() else {
            if chars[i] == '`' {
                self.stack.push(0);
                return HandleResult::Skip(1);
            }
            return HandleResult::Process;
        };

        if depth == 0 {
            if chars[i] == '\\' && i + 1 < chars.len() {
                return HandleResult::Skip(2);
            }
            if chars[i] == '$' && i + 1 < chars.len() && chars[i + 1] == '{' {
                self.set_depth(1);
                return HandleResult::Skip(2);
            }
            if chars[i] == '`' {
                self.stack.pop();
                return HandleResult::Skip(1);
            }
            return HandleResult::Skip(1);
        }

        // In interpolation: track braces and nested templates.
        match chars[i] {
            '`' => {
                self.stack.push(0);
                HandleResult::Skip(1)
            }
            '{' => {
                self.set_depth(depth + 1);
                HandleResult::Process
            }
            '}' if depth == 1 => {
                self.set_depth(0);
                HandleResult::Skip(1)
            }
            '}' => {
                self.set_depth(depth - 1);
                HandleResult::Process
            }
            _ => HandleResult::Process,
        }
    }

    fn set_depth(&mut self, depth: i32) {
        if let Some(top) = self.stack.last_mut() {
            *top = depth;
        }
    }
}

/// Result of handling a character with TemplateState.
pub(super) enum HandleResult {
    /// Skip this many characters (template handling consumed them).
    Skip(usize),
    /// Process this character normally (it's code, not template literal content).
    Process,
}
