use serde::Serialize;

/// A zero-based `(line, column)` position in a document.
///
/// `column` is a UTF-8 byte offset within the line. Positions order by line,
/// then column, which is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Column zero of `line`.
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
