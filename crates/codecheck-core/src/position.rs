//! Offset to line/column translation.

/// Human-readable location of a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<'c> {
    /// Line number (1-indexed).
    pub line: usize,
    /// Full text of the line, including its trailing newline if any.
    pub line_text: &'c str,
    /// Byte distance from the start of the line (0-indexed).
    pub column: usize,
}

/// Resolves `offset` in `content` to a line, the line's text and a column.
///
/// Offsets past the end of `content` are clamped to its length. An offset
/// just after a trailing newline resolves to an empty final line.
#[must_use]
pub fn resolve(content: &str, offset: usize) -> Position<'_> {
    let bytes = content.as_bytes();
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];

    let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let line_end = bytes[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |nl| line_start + nl + 1);

    Position {
        line,
        line_text: &content[line_start..line_end],
        column: offset - line_start,
    }
}

/// Converts a byte column within `line_text` to a character count.
///
/// Used to place a caret under multibyte text. Columns that fall inside a
/// character count that character.
#[must_use]
pub fn display_column(line_text: &str, column: usize) -> usize {
    line_text
        .char_indices()
        .take_while(|(i, _)| *i < column)
        .count()
}
