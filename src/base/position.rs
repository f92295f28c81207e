/// A position in source code (0-indexed)
///
/// `column` counts bytes from the start of the row, matching the byte
/// offsets used everywhere else in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// The point reached after appending `text` at this point.
    pub fn advance(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last) => {
                let rows = text.bytes().filter(|&b| b == b'\n').count() as u32;
                Self::new(self.row + rows, (text.len() - last - 1) as u32)
            }
            None => Self::new(self.row, self.column + text.len() as u32),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}
