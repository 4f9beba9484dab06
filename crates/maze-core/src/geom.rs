//! Grid coordinates: [`Cell`].
//!
//! Rows grow downwards and columns grow to the right. Ordering is the natural
//! `(row, col)` tuple order, which the search relies on for tie-breaking.

use std::fmt;

/// Axis-aligned offsets `(d_row, d_col)` in the order neighbours are visited:
/// right, down, left, up.
pub const OFFSETS_4: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A `(row, col)` grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by `(dr, dc)`.
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The four axis-aligned neighbours, in [`OFFSETS_4`] order.
    ///
    /// Bounds are not checked.
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        OFFSETS_4.map(|(dr, dc)| self.shift(dr, dc))
    }

    /// Whether `other` is exactly one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    #[inline]
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_then_col() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1), Cell::new(1, -1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, -1), Cell::new(1, 0)]
        );
    }

    #[test]
    fn neighbors_follow_offset_order() {
        let c = Cell::new(3, 3);
        assert_eq!(
            c.neighbors_4(),
            [Cell::new(3, 4), Cell::new(4, 3), Cell::new(3, 2), Cell::new(2, 3)]
        );
    }

    #[test]
    fn adjacency() {
        let c = Cell::new(2, 2);
        for n in c.neighbors_4() {
            assert!(c.is_adjacent(n));
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(3, 3)));
        assert!(!Cell::new(i32::MAX, 0).is_adjacent(Cell::new(i32::MIN, 0)));
    }

    #[test]
    fn tuple_conversions_and_display() {
        let c: Cell = (4, 7).into();
        assert_eq!(c, Cell::new(4, 7));
        assert_eq!(<(i32, i32)>::from(c), (4, 7));
        assert_eq!(c.to_string(), "(4, 7)");
    }
}
