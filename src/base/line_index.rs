//! Offset → line/column mapping for a source text.

use text_size::TextSize;

/// A zero-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Precomputed line starts of a text.
///
/// `\n` terminates a line; a `\r\n` pair counts as one terminator because the
/// line start is taken after the `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines in the text (an empty text has one line).
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Zero-based line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let offset = offset.min(self.len);
        (self.line_starts.partition_point(|&start| start <= offset) - 1) as u32
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize];
        LineCol {
            line,
            col: u32::from(offset.min(self.len) - start),
        }
    }

    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of_single_line() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_of(TextSize::new(2)), 0);
    }

    #[test]
    fn test_line_of_multiple_lines() {
        let index = LineIndex::new("a\nbb\r\nccc");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_of(TextSize::new(0)), 0);
        assert_eq!(index.line_of(TextSize::new(1)), 0);
        assert_eq!(index.line_of(TextSize::new(2)), 1);
        assert_eq!(index.line_of(TextSize::new(6)), 2);
        assert_eq!(
            index.line_col(TextSize::new(7)),
            LineCol { line: 2, col: 1 }
        );
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_of(TextSize::new(100)), 1);
    }
}
