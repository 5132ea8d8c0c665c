//! Cursor-context classification for completion.
//!
//! Pure text heuristics: the buffer is almost always syntactically incomplete
//! at the cursor, so nothing here tries to parse Luau.  Each mode is checked in
//! precedence order and the first match wins.

use crate::text::{line_before, offset_of, Position, SourceText};

// ── Context kind ──────────────────────────────────────────────────────────────

/// Which call a string literal is an argument of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringContext {
    /// `:GetService("`
    ServiceName,
    /// `Instance.new("`
    ClassName,
    /// `require("`
    RequirePath,
    /// Any other string: no suggestions.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    String(StringContext),
    /// Inside a block or line comment.
    Comment,
    TypeAnnotation,
    /// `Enum.<Name>.`
    EnumItems { name: String },
    /// `Enum.`
    EnumNames,
    /// `a.b:c`: every segment, the last one being the partial word.
    Accessor { chain: Vec<String> },
    General,
}

// ── classify ──────────────────────────────────────────────────────────────────

pub fn classify<S: SourceText + ?Sized>(src: &S, pos: Position) -> CompletionContext {
    let text = src.full_text();
    let prefix = &text[..offset_of(text, pos)];
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);

    match scan_prefix(prefix) {
        ScanState::QuotedString(at) | ScanState::LongString(at) if at >= line_start => {
            return CompletionContext::String(string_context(&prefix[line_start..at]));
        }
        ScanState::QuotedString(_) | ScanState::LongString(_) => {
            return CompletionContext::String(StringContext::Other);
        }
        ScanState::LineComment | ScanState::BlockComment => return CompletionContext::Comment,
        ScanState::Code => {}
    }

    let before = line_before(src, pos);
    if is_type_position(before) {
        return CompletionContext::TypeAnnotation;
    }

    if let Some(caps) = enum_path_re().captures(before) {
        return CompletionContext::EnumItems { name: caps[1].to_string() };
    }
    if enum_root_re().is_match(before) {
        return CompletionContext::EnumNames;
    }

    match extract_chain(before) {
        Some(chain) => CompletionContext::Accessor { chain },
        None => CompletionContext::General,
    }
}

// ── Strings & comments ────────────────────────────────────────────────────────

/// Lexical state at the end of the text before the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    /// Unterminated quoted string; byte offset of its opening quote.
    QuotedString(usize),
    /// Unterminated `[[ ... ]]` string; byte offset of its opening bracket.
    LongString(usize),
    LineComment,
    BlockComment,
}

/// Single left-to-right pass over everything before the cursor.  Quote and
/// long-bracket openers only count in code, so a `--[[` inside a string or a
/// line comment never opens a block comment.  Only ASCII bytes are
/// significant, so walking bytes is safe for UTF-8 input.
fn scan_prefix(prefix: &str) -> ScanState {
    let bytes = prefix.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            q @ (b'"' | b'\'' | b'`') => {
                let start = i;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => return ScanState::QuotedString(start),
                        Some(b'\\') => i += 2,
                        // Quoted strings cannot span lines.
                        Some(b'\n') => break,
                        Some(&c) if c == q => break,
                        Some(_) => i += 1,
                    }
                }
            }
            b'[' => {
                if let Some(level) = long_bracket_level(&prefix[i..]) {
                    let body = i + level + 2;
                    match find_long_close(&prefix[body..], level) {
                        Some(end) => i = body + end,
                        None => return ScanState::LongString(i),
                    }
                    continue;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                let rest = &prefix[i + 2..];
                match long_bracket_level(rest) {
                    Some(level) => {
                        let body = i + 2 + level + 2;
                        match find_long_close(&prefix[body..], level) {
                            Some(end) => i = body + end,
                            None => return ScanState::BlockComment,
                        }
                    }
                    None => match rest.find('\n') {
                        Some(nl) => i += 2 + nl + 1,
                        None => return ScanState::LineComment,
                    },
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    ScanState::Code
}

/// `[[` → 0, `[==[` → 2, anything else → `None`.
fn long_bracket_level(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('[')?;
    let level = rest.bytes().take_while(|&b| b == b'=').count();
    (rest.as_bytes().get(level) == Some(&b'[')).then_some(level)
}

/// Offset just past the closing `]=*]` of the given level.
fn find_long_close(s: &str, level: usize) -> Option<usize> {
    let closer = format!("]{}]", "=".repeat(level));
    s.find(&closer).map(|i| i + closer.len())
}

fn string_context(before_quote: &str) -> StringContext {
    if get_service_re().is_match(before_quote) {
        StringContext::ServiceName
    } else if instance_new_re().is_match(before_quote) {
        StringContext::ClassName
    } else if require_re().is_match(before_quote) {
        StringContext::RequirePath
    } else {
        StringContext::Other
    }
}

// ── Types, enums, chains ──────────────────────────────────────────────────────

fn is_type_position(before: &str) -> bool {
    type_after_space_re().is_match(before)
        || type_local_re().is_match(before)
        || type_param_re().is_match(before)
        || type_return_re().is_match(before)
}

/// Splits the accessor chain ending at the cursor into segments.  `None` when
/// the text before the cursor does not end in `ident(.|:)...`.
pub fn extract_chain(before: &str) -> Option<Vec<String>> {
    let caps = chain_re().captures(before)?;
    let chain = caps.get(1)?.as_str();
    Some(chain.split(['.', ':']).map(str::to_string).collect())
}

// ── Patterns ──────────────────────────────────────────────────────────────────

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static ::regex::Regex {
            static RE: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            RE.get_or_init(|| ::regex::Regex::new($pattern).expect("valid regex"))
        }
    };
}

lazy_regex!(get_service_re, r":\s*GetService\s*\(\s*$");
lazy_regex!(instance_new_re, r"\bInstance\s*\.\s*new\s*\(\s*$");
lazy_regex!(require_re, r"\brequire\s*\(\s*$");
lazy_regex!(type_after_space_re, r":[ \t]+[A-Za-z_]?\w*$");
lazy_regex!(type_local_re, r"\blocal\s+[A-Za-z_]\w*\s*:\s*[A-Za-z_]?\w*$");
lazy_regex!(type_param_re, r"\bfunction\b[^)]*[(,]\s*[A-Za-z_]\w*\s*:\s*[A-Za-z_]?\w*$");
lazy_regex!(type_return_re, r"\bfunction\b[^()]*\([^()]*\)\s*:\s*[A-Za-z_]?\w*$");
lazy_regex!(enum_path_re, r"\bEnum\.([A-Za-z_]\w*)[.:]\w*$");
lazy_regex!(enum_root_re, r"\bEnum\.\w*$");
lazy_regex!(chain_re, r"(?:^|[^\w])((?:[A-Za-z_]\w*[.:])+\w*)$");

pub(crate) use lazy_regex;
