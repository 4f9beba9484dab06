//! Shortest-path search on 4-connected occupancy grids.
//!
//! - [`Environment`] wraps a static [`Grid`](maze_core::Grid) and answers
//!   passability and adjacency queries.
//! - [`Agent`] runs A\* with the [`manhattan`] heuristic between a start and
//!   a goal, and keeps the cost at which every cell was reached for display.
//! - [`bfs_map`] computes plain breadth-first distances.
//!
//! Both searches work through the [`Pather`] trait, which [`Environment`]
//! implements.

mod astar;
mod bfs;
mod distance;
mod environment;
mod traits;

pub use astar::{Agent, CostMap, PathNode};
pub use bfs::{DistanceMap, bfs_map};
pub use distance::manhattan;
pub use environment::Environment;
pub use traits::Pather;
