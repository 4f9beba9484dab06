use maze_core::Cell;

/// Minimal pathfinding interface over a bounded 4-connected grid.
pub trait Pather {
    /// Grid size as `(rows, cols)`. Cells outside are never passable.
    fn dims(&self) -> (i32, i32);

    /// Whether `c` is in bounds and open.
    fn is_passable(&self, c: Cell) -> bool;

    /// Append the passable neighbours of `c` into `buf`, in
    /// [`OFFSETS_4`](maze_core::OFFSETS_4) order. The caller clears `buf`
    /// before calling.
    fn extend_neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}
