//! Source location tracking.
//!
//! Offsets are character offsets into the cleaned script, matching the
//! `[start, end)` spans recorded for each compiled command.

/// A span of script text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// Character offset where this span starts.
    pub start: usize,
    /// Character offset where this span ends (exclusive).
    pub end: usize,
    /// 1-based line number where this span starts.
    pub line: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Creates a span at the start of input.
    #[must_use]
    pub const fn at_start() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
        }
    }

    /// Creates a span covering the range from this span to another.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self {
            start: self.start,
            end: other.end,
            line: self.line,
        }
    }

    /// Returns the length of this span in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the text this span covers in the given source.
    ///
    /// Out-of-range offsets are clamped to the source length.
    #[must_use]
    pub fn text(&self, source: &str) -> String {
        source
            .chars()
            .skip(self.start)
            .take(self.len())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_at_start() {
        let span = Span::at_start();
        assert_eq!(span.start, 0);
        assert_eq!(span.line, 1);
        assert!(span.is_empty());
    }

    #[test]
    fn span_to_keeps_first_line() {
        let a = Span::new(0, 3, 1);
        let b = Span::new(10, 14, 2);
        let joined = a.to(b);
        assert_eq!(joined, Span::new(0, 14, 1));
        assert_eq!(joined.len(), 14);
    }

    #[test]
    fn span_text_counts_characters() {
        let source = "é = 1;\nprint é";
        assert_eq!(Span::new(0, 5, 1).text(source), "é = 1");
        assert_eq!(Span::new(7, 50, 2).text(source), "print é");
    }
}
