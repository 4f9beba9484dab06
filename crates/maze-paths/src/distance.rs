use maze_core::Cell;

/// Manhattan (L1) distance between two cells.
///
/// Computed in `i64` so that any pair of `i32` coordinates is exact.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i64 {
    i64::from(a.row.abs_diff(b.row)) + i64::from(a.col.abs_diff(b.col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, -4);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(manhattan(b, a), 7);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn manhattan_extreme_coordinates() {
        let a = Cell::new(i32::MAX, i32::MAX);
        let b = Cell::new(i32::MIN, i32::MIN);
        assert_eq!(manhattan(a, b), 2 * (u32::MAX as i64));
        assert_eq!(manhattan(Cell::new(0, 0), Cell::new(i32::MIN, 0)), 1 << 31);
    }
}
