//! Maze generation for stepmaze grids.
//!
//! - **[`RandomFrontierHeap`]**: frontier that extracts a recency-biased
//!   random member instead of a minimum
//! - **[`MazeGenerator`]**: randomized Prim over the odd-coordinate lattice,
//!   one carve per [`tick`](MazeGenerator::tick)

pub mod frontier;
pub mod maze;

pub use frontier::RandomFrontierHeap;
pub use maze::{MazeGenerator, MazeStatus};
