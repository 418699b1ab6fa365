//! Step-driven shortest-path search for maze grids.
//!
//! This crate provides the priority queue and the search that rides on it:
//!
//! - **Ring primitives** over the node arena ([`ring`])
//! - **[`MergeableHeap`]**: min-queue with decrease-key via cuts and
//!   cascading cuts
//! - **[`SearchStepper`]**: Dijkstra / A*, one pop per [`tick`](SearchStepper::tick)
//! - **[`PathTracer`]**: marks the found path one cell per step
//!
//! All per-node state lives in the [`stepmaze_core::Grid`] arena; the heap
//! and the steppers hold only indices and counters, so they are cheap to
//! discard between runs.

mod distance;
mod heap;
mod neighbors;
pub mod ring;
mod search;
mod trace;

pub use distance::manhattan;
pub use heap::MergeableHeap;
pub use neighbors::Neighbors;
pub use search::{Algorithm, SearchStats, SearchStatus, SearchStepper};
pub use trace::{PathTracer, TraceStatus};
