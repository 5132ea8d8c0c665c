//! Read-only text queries the analysis consumes from its host.
//!
//! Positions are 0-based.  Columns are byte offsets into the line; anything
//! past the end of the line is clamped, and anything inside a multi-byte
//! character is floored to the character start.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }
}

/// What the analysis needs from a text buffer.
pub trait SourceText {
    /// Text of one line without its terminator; empty past the end of the buffer.
    fn line_text(&self, line: u32) -> &str;

    fn full_text(&self) -> &str;

    /// Range of the identifier containing or ending at `pos`.  Empty (at `pos`)
    /// when there is no identifier there.
    fn word_range_at(&self, pos: Position) -> Range {
        let line = self.line_text(pos.line);
        let col = clamp_col(line, pos.character as usize);
        let start = line[..col]
            .rfind(|c: char| !is_ident_char(c))
            .map(|i| i + line[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let end = col
            + line[col..]
                .find(|c: char| !is_ident_char(c))
                .unwrap_or(line.len() - col);
        Range::new(
            Position::new(pos.line, start as u32),
            Position::new(pos.line, end as u32),
        )
    }
}

impl SourceText for str {
    fn line_text(&self, line: u32) -> &str {
        self.lines().nth(line as usize).unwrap_or("")
    }

    fn full_text(&self) -> &str {
        self
    }
}

impl SourceText for String {
    fn line_text(&self, line: u32) -> &str {
        self.as_str().line_text(line)
    }

    fn full_text(&self) -> &str {
        self
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Clamp `col` to `line` and floor it onto a char boundary.
pub fn clamp_col(line: &str, col: usize) -> usize {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }
    col
}

/// Text of the cursor line up to the cursor.
pub fn line_before<'t, S: SourceText + ?Sized>(src: &'t S, pos: Position) -> &'t str {
    let line = src.line_text(pos.line);
    &line[..clamp_col(line, pos.character as usize)]
}

/// Byte offset of `pos` in the full text.
pub fn offset_of(text: &str, pos: Position) -> usize {
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i == pos.line as usize {
            let body = line.trim_end_matches(['\n', '\r']);
            return offset + clamp_col(body, pos.character as usize);
        }
        offset += line.len();
    }
    text.len()
}

/// The identifier that contains or immediately precedes the cursor.
pub fn word_at<S: SourceText + ?Sized>(src: &S, pos: Position) -> Option<(&str, Range)> {
    let range = src.word_range_at(pos);
    if range.start.character == range.end.character {
        return None;
    }
    let line = src.line_text(pos.line);
    Some((
        &line[range.start.character as usize..range.end.character as usize],
        range,
    ))
}
