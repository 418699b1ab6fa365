//! **stepmaze-core**: grid types shared by the maze generator and the
//! shortest-path search.
//!
//! This crate provides geometry primitives, the per-cell state enum, and the
//! node arena ([`Grid`]) whose records double as priority-queue entries.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod node;

pub use cell::CellState;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use node::{HeapEntry, Node, NodeId, UNREACHABLE};
