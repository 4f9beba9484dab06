//! The occupancy [`Grid`]: a rectangular array of `i32` values where `0`
//! marks open floor and anything else is a wall.

use std::fmt;
use std::str::FromStr;

use crate::geom::Cell;

/// Value of a traversable cell.
pub const OPEN: i32 = 0;

/// Value written for walls by [`Grid::from_str`].
pub const WALL: i32 = 1;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when building a grid from raw rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows with no columns.
    Empty,
    /// Row `row` has `found` columns instead of `expected`.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A layout character that is neither floor, wall nor a digit.
    InvalidChar { ch: char, row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} columns, expected {expected}"
            ),
            Self::InvalidChar { ch, row, col } => {
                write!(f, "grid: invalid character {ch:?} at ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size, row-major occupancy grid.
///
/// Every row has the same length; this is checked at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>"))]
pub struct Grid {
    cells: Vec<i32>,
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Build a grid from raw rows.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells,
            rows: rows.len() as i32,
            cols: expected as i32,
        })
    }

    /// Create an all-open grid. Non-positive dimensions yield an empty grid.
    pub fn open(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            cells: vec![OPEN; (rows * cols) as usize],
            rows,
            cols,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    /// Cell at a flat row-major index.
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Raw value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<i32> {
        self.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` is inside the grid and open.
    #[inline]
    pub fn is_open(&self, c: Cell) -> bool {
        self.at(c) == Some(OPEN)
    }

    /// Number of open cells.
    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|&&v| v == OPEN).count()
    }

    /// Iterate over `(Cell, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.cell(i), v))
    }

    /// Copy the grid back out as rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(<[i32]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<i32>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

/// Fixed-size arrays are rectangular by construction.
impl<const R: usize, const C: usize> From<[[i32; C]; R]> for Grid {
    fn from(rows: [[i32; C]; R]) -> Self {
        if R == 0 || C == 0 {
            return Self::open(0, 0);
        }
        Self {
            cells: rows.as_flattened().to_vec(),
            rows: R as i32,
            cols: C as i32,
        }
    }
}

impl From<Grid> for Vec<Vec<i32>> {
    fn from(g: Grid) -> Self {
        g.to_rows()
    }
}

/// Parses a textual layout, one line per row.
///
/// `.` is open floor and `#` is a wall; a digit is taken as the raw cell
/// value. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row_idx = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' => Ok(OPEN),
                    '#' => Ok(WALL),
                    _ => ch
                        .to_digit(10)
                        .map(|d| d as i32)
                        .ok_or(GridError::InvalidChar {
                            ch,
                            row: row_idx,
                            col,
                        }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_and_size() {
        let g = Grid::from_rows(vec![vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.len(), 6);
        assert_eq!(g.count_open(), 5);
    }

    #[test]
    fn at_and_is_open() {
        let g = Grid::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap();
        assert_eq!(g.at(Cell::new(0, 1)), Some(1));
        assert_eq!(g.at(Cell::new(1, 0)), Some(2));
        assert_eq!(g.at(Cell::new(2, 0)), None);
        assert_eq!(g.at(Cell::new(0, -1)), None);
        assert!(g.is_open(Cell::new(0, 0)));
        assert!(!g.is_open(Cell::new(1, 0)));
        assert!(!g.is_open(Cell::new(-1, 0)));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::from_rows(vec![vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "grid: row 1 has 1 columns, expected 2");
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
    }

    #[test]
    fn iter_is_row_major() {
        let g = Grid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(
            items,
            vec![
                (Cell::new(0, 0), 0),
                (Cell::new(0, 1), 1),
                (Cell::new(1, 0), 1),
                (Cell::new(1, 1), 0),
            ]
        );
    }

    #[test]
    fn parse_layout() {
        let g: Grid = "
            .#.
            ..3
        "
        .parse()
        .unwrap();
        assert_eq!(g.to_rows(), vec![vec![0, 1, 0], vec![0, 0, 3]]);
    }

    #[test]
    fn parse_invalid_char() {
        let err = "..\n.x".parse::<Grid>().unwrap_err();
        assert_eq!(err, GridError::InvalidChar { ch: 'x', row: 1, col: 1 });
        assert_eq!(err.to_string(), "grid: invalid character 'x' at (1, 1)");
    }

    #[test]
    fn from_array() {
        let g = Grid::from([[0, 1, 0], [1, 0, 0]]);
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.at(Cell::new(1, 0)), Some(1));
        assert!(Grid::from([[0i32; 0]; 2]).is_empty());
    }

    #[test]
    fn open_grid() {
        let g = Grid::open(3, 4);
        assert_eq!(g.count_open(), 12);
        assert_eq!(g.cell(5), Cell::new(1, 1));
        assert_eq!(g.index(Cell::new(2, 3)), Some(11));
    }
}
