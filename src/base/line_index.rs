//! Offset to row/column conversion.

use text_size::TextSize;

use super::Point;

/// Start offsets of every line in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| TextSize::new(i as u32 + 1)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Row/column of `offset`. Offsets past the end clamp to the end.
    pub fn point(&self, offset: TextSize) -> Point {
        let offset = offset.min(self.len);
        let row = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[row];
        Point::new(row as u32, column.into())
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
