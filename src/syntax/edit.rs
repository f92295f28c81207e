//! Edit records
//!
//! An [`InputEdit`] says which bytes of the old source were replaced and how
//! long the replacement is. Recording one on a tree shifts every span after
//! it without touching the tree's structure; the next incremental parse
//! consumes the records to decide what it can reuse.

use std::ops::Range;

use crate::base::Point;
use crate::error::Error;

/// A byte-range replacement: `old[start_byte..old_end_byte]` became
/// `new[start_byte..new_end_byte]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEdit {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_position: Point,
    pub old_end_position: Point,
    pub new_end_position: Point,
}

impl InputEdit {
    /// The record for replacing `old_source[range]` with `new_text`.
    pub fn replace(old_source: &str, range: Range<usize>, new_text: &str) -> Result<Self, Error> {
        if range.start > range.end {
            return Err(Error::invalid_edit("range start after range end"));
        }
        let Some(before) = old_source.get(..range.start) else {
            return Err(Error::invalid_edit("range start out of bounds or not a char boundary"));
        };
        let Some(removed) = old_source.get(range.clone()) else {
            return Err(Error::invalid_edit("range end out of bounds or not a char boundary"));
        };
        let start_position = Point::default().advance(before);
        Ok(Self {
            start_byte: range.start,
            old_end_byte: range.end,
            new_end_byte: range.start + new_text.len(),
            start_position,
            old_end_position: start_position.advance(removed),
            new_end_position: start_position.advance(new_text),
        })
    }

    /// Byte length change; positive when the edit grew the text.
    pub fn delta(&self) -> isize {
        self.new_end_byte as isize - self.old_end_byte as isize
    }

    pub(crate) fn validate(&self, len: usize) -> Result<(), Error> {
        if self.start_byte > self.old_end_byte {
            return Err(Error::invalid_edit("start after old end"));
        }
        if self.start_byte > self.new_end_byte {
            return Err(Error::invalid_edit("start after new end"));
        }
        if self.old_end_byte > len {
            return Err(Error::invalid_edit("old end past the end of the tree"));
        }
        let ends = [
            (
                self.old_end_position,
                self.old_end_byte,
                "old end position out of step with its byte",
            ),
            (
                self.new_end_position,
                self.new_end_byte,
                "new end position out of step with its byte",
            ),
        ];
        for (end, end_byte, reason) in ends {
            if !points_fit(self.start_position, end, end_byte - self.start_byte) {
                return Err(Error::invalid_edit(reason));
            }
        }
        Ok(())
    }

    /// Where a byte that was at `offset` before the edit is now.
    ///
    /// Offsets at or past the old end move with the text after it, so a node
    /// ending where text was inserted grows to include it. Offsets strictly
    /// inside the replaced range collapse onto the replacement.
    pub fn map_offset(&self, offset: usize) -> usize {
        if offset >= self.old_end_byte {
            offset - self.old_end_byte + self.new_end_byte
        } else if offset <= self.start_byte {
            offset
        } else {
            offset.min(self.new_end_byte)
        }
    }

    /// [`map_offset`](Self::map_offset) for the point at `offset`.
    pub fn map_point(&self, offset: usize, point: Point) -> Point {
        if offset >= self.old_end_byte {
            if point.row == self.old_end_position.row {
                let column = point.column.saturating_sub(self.old_end_position.column);
                Point::new(
                    self.new_end_position.row,
                    column + self.new_end_position.column,
                )
            } else {
                let row = point.row.saturating_sub(self.old_end_position.row);
                Point::new(row + self.new_end_position.row, point.column)
            }
        } else if offset <= self.start_byte {
            point
        } else {
            point.min(self.new_end_position)
        }
    }

    /// True if the byte range `start..end` touches the replaced range.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        start <= self.old_end_byte && end >= self.start_byte
    }
}

/// Whether `end` can lie `bytes` bytes after `start`: each row crossed takes
/// at least one byte, and on a single row columns count bytes.
fn points_fit(start: Point, end: Point, bytes: usize) -> bool {
    match end.row.checked_sub(start.row) {
        Some(0) => end.column.checked_sub(start.column) == u32::try_from(bytes).ok(),
        Some(rows) => rows as usize <= bytes,
        None => false,
    }
}
