//! Position encoding: the analysis works in byte columns, LSP clients default
//! to UTF-16 code units.

use tidal_intel::text::clamp_col;
use tidal_intel::{Position as SrcPosition, Range as SrcRange, SourceText};
use tower_lsp::lsp_types::{ClientCapabilities, Position, PositionEncodingKind, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf16,
    Utf8,
}

impl Encoding {
    /// UTF-8 when the client offers it, else the mandatory UTF-16.
    pub fn negotiate(capabilities: &ClientCapabilities) -> Self {
        let offered = capabilities
            .general
            .as_ref()
            .and_then(|general| general.position_encodings.as_ref());
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF8) => Encoding::Utf8,
            _ => Encoding::Utf16,
        }
    }

    pub fn kind(self) -> PositionEncodingKind {
        match self {
            Encoding::Utf8 => PositionEncodingKind::UTF8,
            Encoding::Utf16 => PositionEncodingKind::UTF16,
        }
    }

    /// Client column on `line` to a byte column.  A column inside a surrogate
    /// pair rounds up to the next character.
    pub fn to_byte(self, line: &str, column: u32) -> u32 {
        if self == Encoding::Utf8 {
            return column;
        }
        let mut units = 0;
        for (i, c) in line.char_indices() {
            if units >= column {
                return i as u32;
            }
            units += c.len_utf16() as u32;
        }
        line.len() as u32
    }

    /// Byte column on `line` to a client column.
    pub fn from_byte(self, line: &str, column: u32) -> u32 {
        if self == Encoding::Utf8 {
            return column;
        }
        let column = clamp_col(line, column as usize);
        line[..column].encode_utf16().count() as u32
    }
}

/// One document's text paired with the negotiated encoding.
#[derive(Debug, Clone, Copy)]
pub struct LineIndex<'t> {
    text: &'t str,
    encoding: Encoding,
}

impl<'t> LineIndex<'t> {
    pub fn new(text: &'t str, encoding: Encoding) -> Self {
        Self { text, encoding }
    }

    pub fn position(&self, pos: Position) -> SrcPosition {
        let line = self.text.line_text(pos.line);
        SrcPosition::new(pos.line, self.encoding.to_byte(line, pos.character))
    }

    pub fn lsp_position(&self, pos: SrcPosition) -> Position {
        let line = self.text.line_text(pos.line);
        Position::new(pos.line, self.encoding.from_byte(line, pos.character))
    }

    pub fn lsp_range(&self, range: SrcRange) -> Range {
        Range::new(self.lsp_position(range.start), self.lsp_position(range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::GeneralClientCapabilities;

    const LINE: &str = "print(\"héllo\") workspace.Gr";

    #[test]
    fn utf16_columns_map_to_bytes_and_back() {
        let enc = Encoding::Utf16;
        // `é` is two bytes but one UTF-16 unit.
        assert_eq!(enc.to_byte(LINE, 27), 28);
        assert_eq!(enc.to_byte(LINE, 8), 8);
        assert_eq!(enc.to_byte(LINE, 9), 10);
        assert_eq!(enc.from_byte(LINE, 28), 27);
        assert_eq!(enc.from_byte(LINE, 10), 9);
        assert_eq!(enc.to_byte(LINE, 99), LINE.len() as u32);
    }

    #[test]
    fn surrogate_pairs_count_twice() {
        let line = "a😀b";
        let enc = Encoding::Utf16;
        assert_eq!(enc.to_byte(line, 3), 5);
        assert_eq!(enc.from_byte(line, 5), 3);
        assert_eq!(enc.to_byte(line, 2), 5);
    }

    #[test]
    fn utf8_passes_through() {
        assert_eq!(Encoding::Utf8.to_byte(LINE, 28), 28);
        assert_eq!(Encoding::Utf8.from_byte(LINE, 28), 28);
    }

    #[test]
    fn negotiation_prefers_utf8_when_offered() {
        assert_eq!(Encoding::negotiate(&ClientCapabilities::default()), Encoding::Utf16);
        let caps = ClientCapabilities {
            general: Some(GeneralClientCapabilities {
                position_encodings: Some(vec![PositionEncodingKind::UTF16, PositionEncodingKind::UTF8]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(Encoding::negotiate(&caps), Encoding::Utf8);
        assert_eq!(Encoding::negotiate(&caps).kind(), PositionEncodingKind::UTF8);
    }

    #[test]
    fn line_index_converts_per_line() {
        let text = format!("local x = 1\n{LINE}");
        let index = LineIndex::new(&text, Encoding::Utf16);
        assert_eq!(index.position(Position::new(1, 27)), SrcPosition::new(1, 28));
        let range = SrcRange::new(SrcPosition::new(1, 26), SrcPosition::new(1, 28));
        assert_eq!(index.lsp_range(range), Range::new(Position::new(1, 25), Position::new(1, 27)));
    }
}
