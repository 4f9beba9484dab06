use std::collections::VecDeque;

use maze_core::Cell;

use crate::traits::Pather;

/// Uniform-cost distances from a single source, as computed by [`bfs_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    source: Cell,
    rows: i32,
    cols: i32,
    dist: Vec<Option<i32>>,
}

impl DistanceMap {
    /// The cell distances are measured from.
    #[inline]
    pub fn source(&self) -> Cell {
        self.source
    }

    /// Number of steps from the source to `c`, or `None` if `c` was not
    /// reached or is out of range.
    pub fn at(&self, c: Cell) -> Option<i32> {
        self.idx(c).and_then(|i| self.dist[i])
    }

    /// Number of cells reached, the source included.
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }

    #[inline]
    fn idx(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }
}

/// Compute breadth-first step distances from `source` to every reachable
/// cell. An impassable source reaches nothing.
pub fn bfs_map<P: Pather>(pather: &P, source: Cell) -> DistanceMap {
    let (rows, cols) = pather.dims();
    let (rows, cols) = (rows.max(0), cols.max(0));
    let mut map = DistanceMap {
        source,
        rows,
        cols,
        dist: vec![None; (rows * cols) as usize],
    };

    let Some(si) = map.idx(source).filter(|_| pather.is_passable(source)) else {
        return map;
    };
    map.dist[si] = Some(0);

    let mut queue: VecDeque<(Cell, i32)> = VecDeque::new();
    queue.push_back((source, 0));
    let mut nbuf = Vec::with_capacity(4);

    while let Some((cp, d)) = queue.pop_front() {
        nbuf.clear();
        pather.extend_neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = map.idx(np) else {
                continue;
            };
            if map.dist[ni].is_some() {
                continue;
            }
            map.dist[ni] = Some(d + 1);
            queue.push_back((np, d + 1));
        }
    }

    map
}
