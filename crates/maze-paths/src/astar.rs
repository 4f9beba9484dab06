use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indexmap::IndexMap;
use maze_core::Cell;

use crate::distance::manhattan;
use crate::environment::Environment;
use crate::traits::Pather;

/// Exploration costs keyed by cell, in the order each cell was first
/// improved.
pub type CostMap = IndexMap<Cell, i32>;

/// A cell with an associated cost, as rendered by cost labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Cell,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Internal node cache
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry. Pops smallest `f` first, then smallest cell.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    f: i64,
    pos: Cell,
    idx: usize,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest (f, cell).
        (other.f, other.pos).cmp(&(self.f, self.pos))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A* search context bound to a map and a pair of endpoints.
///
/// Each call to [`find_path`](Agent::find_path) starts from a fresh frontier
/// and fresh predecessor links. The exploration [`costs`](Agent::costs)
/// accumulate across calls until [`reset`](Agent::reset).
pub struct Agent<P: Pather = Environment> {
    env: P,
    start: Cell,
    goal: Cell,
    costs: CostMap,
    rows: i32,
    cols: i32,
    nodes: Vec<Node>,
    generation: u32,
    nbuf: Vec<Cell>,
}

impl<P: Pather> Agent<P> {
    /// Bind a search to `env` between `start` and `goal`.
    ///
    /// Endpoints are not validated here; an impassable or out-of-range
    /// endpoint simply yields no path.
    pub fn new(env: P, start: Cell, goal: Cell) -> Self {
        let (rows, cols) = env.dims();
        let (rows, cols) = (rows.max(0), cols.max(0));
        Self {
            env,
            start,
            goal,
            costs: CostMap::new(),
            rows,
            cols,
            nodes: vec![Node::default(); (rows * cols) as usize],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The map being searched.
    #[inline]
    pub fn environment(&self) -> &P {
        &self.env
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Re-target the search. Recorded costs are kept.
    pub fn set_endpoints(&mut self, start: Cell, goal: Cell) {
        self.start = start;
        self.goal = goal;
    }

    /// Best cost recorded for every cell improved since the last reset.
    ///
    /// The start cell is never recorded: its cost is implicitly 0.
    #[inline]
    pub fn costs(&self) -> &CostMap {
        &self.costs
    }

    /// Recorded cost of `c`, if any.
    #[inline]
    pub fn cost_at(&self, c: Cell) -> Option<i32> {
        self.costs.get(&c).copied()
    }

    /// Recorded costs as [`PathNode`]s, in recording order.
    pub fn cost_nodes(&self) -> impl Iterator<Item = PathNode> + '_ {
        self.costs
            .iter()
            .map(|(&pos, &cost)| PathNode { pos, cost })
    }

    /// Forget all recorded exploration costs.
    pub fn reset(&mut self) {
        log::debug!("astar: reset {} recorded costs", self.costs.len());
        self.costs.clear();
    }

    /// Compute a shortest path from the start to the goal.
    ///
    /// Returns the path *excluding* the start cell and including the goal,
    /// so `start == goal` yields an empty path. Returns `None` when the start
    /// is not passable or the goal cannot be reached.
    ///
    /// Frontier ties on `f = g + h` are broken by ascending `(row, col)`, and
    /// neighbours are relaxed in offset order, so the result is
    /// deterministic.
    pub fn find_path(&mut self) -> Option<Vec<Cell>> {
        let (start, goal) = (self.start, self.goal);
        let start_idx = self.idx(start).filter(|_| self.env.is_passable(start));
        let Some(start_idx) = start_idx else {
            log::debug!("astar: start {start} is not passable");
            return None;
        };

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            f: manhattan(start, goal),
            pos: start,
            idx: start_idx,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };
            let ci = current.idx;

            // Skip entries superseded by a cheaper push.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if current.pos == goal {
                break 'search Some(ci);
            }

            self.nodes[ci].open = false;
            expanded += 1;
            let tentative_g = self.nodes[ci].g + 1;

            nbuf.clear();
            self.env.extend_neighbors(current.pos, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }
                n.generation = cur_gen;
                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                open.push(NodeRef {
                    f: i64::from(tentative_g) + manhattan(np, goal),
                    pos: np,
                    idx: ni,
                });
                self.costs.insert(np, tentative_g);
                log::trace!("astar: {np} reached at cost {tentative_g}");
            }
        };

        self.nbuf = nbuf;

        let Some(goal_idx) = found else {
            log::debug!("astar: no path {start} -> {goal} after {expanded} expansions");
            return None;
        };

        // Follow parents back to (but not including) the start.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx {
            path.push(self.cell(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        log::debug!(
            "astar: path {start} -> {goal} of {} steps after {expanded} expansions",
            path.len()
        );
        Some(path)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    #[inline]
    fn cell(&self, idx: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(layout: &str, start: (i32, i32), goal: (i32, i32)) -> Agent {
        Agent::new(layout.parse().unwrap(), start.into(), goal.into())
    }

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn open_3x3_prefers_lower_cells_on_ties() {
        let mut a = agent("...\n...\n...", (0, 0), (2, 2));
        let path = a.find_path().unwrap();
        assert_eq!(path, cells(&[(0, 1), (0, 2), (1, 2), (2, 2)]));
        let recorded: Vec<_> = a.costs().iter().map(|(&c, &g)| ((c.row, c.col), g)).collect();
        assert_eq!(
            recorded,
            vec![
                ((0, 1), 1),
                ((1, 0), 1),
                ((0, 2), 2),
                ((1, 1), 2),
                ((1, 2), 3),
                ((2, 0), 2),
                ((2, 1), 3),
                ((2, 2), 4),
            ]
        );
    }

    #[test]
    fn path_excludes_start() {
        let mut a = agent("....", (0, 0), (0, 3));
        assert_eq!(a.find_path().unwrap(), cells(&[(0, 1), (0, 2), (0, 3)]));
        assert_eq!(a.cost_at(Cell::new(0, 0)), None);
    }

    #[test]
    fn start_equals_goal() {
        let mut a = agent("..\n..", (1, 1), (1, 1));
        assert_eq!(a.find_path(), Some(vec![]));
        assert!(a.costs().is_empty());
    }

    #[test]
    fn wall_row_blocks() {
        let mut a = agent("...\n###\n...", (0, 0), (2, 2));
        assert_eq!(a.find_path(), None);
        let recorded: Vec<_> = a.cost_nodes().collect();
        assert_eq!(
            recorded,
            vec![
                PathNode { pos: Cell::new(0, 1), cost: 1 },
                PathNode { pos: Cell::new(0, 2), cost: 2 },
            ]
        );
    }

    #[test]
    fn detours_around_obstacle() {
        let mut a = agent("...\n.#.\n...", (0, 0), (2, 2));
        assert_eq!(a.find_path().unwrap(), cells(&[(0, 1), (0, 2), (1, 2), (2, 2)]));
        assert_eq!(a.costs().len(), 7);
        assert_eq!(a.cost_at(Cell::new(1, 1)), None);
    }

    #[test]
    fn reverse_direction() {
        let mut a = agent("...\n...\n...", (2, 2), (0, 0));
        assert_eq!(a.find_path().unwrap(), cells(&[(1, 2), (0, 2), (0, 1), (0, 0)]));
        let order: Vec<_> = a.costs().keys().copied().collect();
        assert_eq!(order, cells(&[(2, 1), (1, 2), (1, 1), (0, 2), (0, 1), (0, 0)]));
    }

    #[test]
    fn impassable_endpoints() {
        let mut a = agent(".#.\n...", (0, 1), (1, 1));
        assert_eq!(a.find_path(), None);
        let mut a = agent(".#.\n...", (0, 0), (0, 1));
        assert_eq!(a.find_path(), None);
        let mut a = agent("..\n..", (0, 0), (5, 5));
        assert_eq!(a.find_path(), None);
        let mut a = agent("..\n..", (-1, 0), (1, 1));
        assert_eq!(a.find_path(), None);
    }

    #[test]
    fn far_out_of_range_goal_explores_and_fails() {
        let mut a = agent("..\n..", (0, 0), (i32::MIN, 0));
        assert_eq!(a.find_path(), None);
        let order: Vec<_> = a.costs().keys().copied().collect();
        assert_eq!(order, cells(&[(0, 1), (1, 0), (1, 1)]));

        let mut a = agent("..\n..", (1, 1), (i32::MAX, i32::MIN));
        assert_eq!(a.find_path(), None);
        assert_eq!(a.costs().len(), 3);
    }

    #[test]
    fn costs_persist_until_reset() {
        let mut a = agent("....\n....", (0, 0), (0, 3));
        a.find_path().unwrap();
        let first = a.costs().len();
        assert!(first > 0);

        a.set_endpoints(Cell::new(1, 3), Cell::new(1, 0));
        let path = a.find_path().unwrap();
        assert_eq!(path.last(), Some(&Cell::new(1, 0)));
        assert!(a.costs().len() >= first);
        assert_eq!(a.start(), Cell::new(1, 3));

        a.reset();
        assert!(a.costs().is_empty());
        assert_eq!(a.find_path().unwrap().len(), 3);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut a = agent(".....\n.#.#.\n.....\n.#.#.\n.....", (0, 0), (4, 4));
        let first = a.find_path();
        let first_costs = a.costs().clone();
        a.reset();
        let second = a.find_path();
        assert_eq!(first, second);
        assert_eq!(&first_costs, a.costs());
        assert!(first_costs.iter().eq(a.costs().iter()));
    }

    #[test]
    fn frontier_orders_by_f_then_cell() {
        let mut heap = BinaryHeap::new();
        for (f, r, c) in [(3, 0, 1), (2, 1, 0), (2, 0, 5), (3, 0, 0)] {
            heap.push(NodeRef {
                f,
                pos: Cell::new(r, c),
                idx: 0,
            });
        }
        let popped: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|n| (n.f, n.pos.row, n.pos.col))
            .collect();
        assert_eq!(popped, vec![(2, 0, 5), (2, 1, 0), (3, 0, 0), (3, 0, 1)]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Cell::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
