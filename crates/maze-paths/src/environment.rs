//! The grid [`Environment`]: a static occupancy grid plus its precomputed
//! adjacency lists.

use std::str::FromStr;

use maze_core::{Cell, Grid, GridError};

use crate::traits::Pather;

/// A static maze that answers passability and adjacency queries.
///
/// Adjacency is computed once at construction. A cell's neighbour list holds
/// the passable cells among its four axis-aligned neighbours, in
/// [`OFFSETS_4`](maze_core::OFFSETS_4) order; walls have no neighbours.
#[derive(Debug, Clone)]
pub struct Environment {
    grid: Grid,
    adjacency: Vec<Vec<Cell>>,
}

impl Environment {
    /// Wrap `grid` and build its adjacency lists.
    pub fn new(grid: Grid) -> Self {
        let adjacency = (0..grid.len())
            .map(|i| {
                let mut buf = Vec::with_capacity(4);
                scan_neighbors(&grid, grid.cell(i), &mut buf);
                buf
            })
            .collect::<Vec<_>>();
        log::debug!(
            "environment: {}x{} grid, {} open cells, {} directed edges",
            grid.rows(),
            grid.cols(),
            grid.count_open(),
            adjacency.iter().map(Vec::len).sum::<usize>()
        );
        Self { grid, adjacency }
    }

    /// Validate raw rows and build an environment from them.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        Grid::from_rows(rows).map(Self::new)
    }

    /// The underlying occupancy grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.grid.cols()
    }

    /// Whether `c` is inside the grid and open. Never fails: out-of-range
    /// cells are simply not passable.
    #[inline]
    pub fn is_passable(&self, c: Cell) -> bool {
        self.grid.is_open(c)
    }

    /// Passable neighbours of `c` in offset order. Empty for walls and
    /// out-of-range cells.
    #[inline]
    pub fn neighbors(&self, c: Cell) -> &[Cell] {
        match self.grid.index(c) {
            Some(i) => self.adjacency[i].as_slice(),
            None => &[],
        }
    }
}

/// Compute the neighbours of `c` directly from the grid.
fn scan_neighbors(grid: &Grid, c: Cell, buf: &mut Vec<Cell>) {
    if !grid.is_open(c) {
        return;
    }
    buf.extend(c.neighbors_4().into_iter().filter(|&n| grid.is_open(n)));
}

impl Pather for Environment {
    #[inline]
    fn dims(&self) -> (i32, i32) {
        (self.rows(), self.cols())
    }

    #[inline]
    fn is_passable(&self, c: Cell) -> bool {
        Environment::is_passable(self, c)
    }

    #[inline]
    fn extend_neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend_from_slice(self.neighbors(c));
    }
}

impl From<Grid> for Environment {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}

impl FromStr for Environment {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        s.parse::<Grid>().map(Self::new)
    }
}
