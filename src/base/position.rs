/// Position tracking for converted nodes
///
/// Stores the source location (line/column) of the node a converted
/// construct came from, for diagnostics and line-span annotations.
/// A span representing a range in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }

    /// Number of lines touched by this span (at least one).
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_position() {
        let span = Span::from_coords(5, 10, 5, 20);

        assert!(span.contains(Position::new(5, 15)));
        assert!(span.contains(Position::new(5, 10)));
        assert!(span.contains(Position::new(5, 20)));

        assert!(!span.contains(Position::new(4, 15)));
        assert!(!span.contains(Position::new(6, 15)));
        assert!(!span.contains(Position::new(5, 9)));
        assert!(!span.contains(Position::new(5, 21)));
    }

    #[test]
    fn test_span_line_count() {
        assert_eq!(Span::from_coords(3, 0, 3, 4).line_count(), 1);
        assert_eq!(Span::from_coords(3, 0, 7, 1).line_count(), 5);
    }
}
