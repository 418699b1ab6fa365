//! Arena node: a grid cell and its priority-queue entry, side by side.
//!
//! Every link is a [`NodeId`] into the owning arena, so sibling rings and
//! heap trees never form ownership cycles.

use crate::cell::CellState;

/// Index of a node in the grid arena (row-major cell index).
pub type NodeId = usize;

/// Sentinel for "no distance yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// Priority-queue half of a [`Node`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapEntry {
    /// Best known distance from the search start.
    pub dist: i32,
    /// Heuristic estimate to the goal (0 under Dijkstra).
    pub est: i32,
    /// Predecessor on the best known path, or the carving predecessor.
    pub prev: Option<NodeId>,
    pub parent: Option<NodeId>,
    /// Anchor of the child ring.
    pub child: Option<NodeId>,
    pub left: NodeId,
    pub right: NodeId,
    pub degree: usize,
    /// Lost a child since it was last made a root or cut.
    pub mark: bool,
}

impl HeapEntry {
    /// A detached entry forming a self-ring around `id`.
    pub const fn detached(id: NodeId) -> Self {
        Self {
            dist: UNREACHABLE,
            est: UNREACHABLE,
            prev: None,
            parent: None,
            child: None,
            left: id,
            right: id,
            degree: 0,
            mark: false,
        }
    }
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    index: NodeId,
    pub state: CellState,
    pub heap: HeapEntry,
}

impl Node {
    /// A fresh node at arena index `index`.
    pub const fn new(index: NodeId, state: CellState) -> Self {
        Self {
            index,
            state,
            heap: HeapEntry::detached(index),
        }
    }

    /// Arena index; fixed for the node's lifetime.
    #[inline]
    pub const fn index(&self) -> NodeId {
        self.index
    }

    /// Heap key: `dist + est`, saturating at [`UNREACHABLE`].
    #[inline]
    pub const fn total_cost(&self) -> i32 {
        self.heap.dist.saturating_add(self.heap.est)
    }

    /// Whether this node is alone in its sibling ring.
    #[inline]
    pub const fn is_isolated(&self) -> bool {
        self.heap.left == self.index && self.heap.right == self.index
    }

    /// Clear every search and heap field, keeping walls.
    pub fn reset(&mut self) {
        if self.state != CellState::Blocked {
            self.state = CellState::Undiscovered;
        }
        self.heap = HeapEntry::detached(self.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_self_ring() {
        let n = Node::new(7, CellState::Undiscovered);
        assert!(n.is_isolated());
        assert_eq!(n.total_cost(), UNREACHABLE);
        assert_eq!(n.heap.degree, 0);
        assert!(!n.heap.mark);
    }

    #[test]
    fn total_cost_saturates() {
        let mut n = Node::new(0, CellState::Undiscovered);
        n.heap.dist = 5;
        assert_eq!(n.total_cost(), UNREACHABLE);
        n.heap.est = 3;
        assert_eq!(n.total_cost(), 8);
    }

    #[test]
    fn reset_keeps_walls() {
        let mut wall = Node::new(1, CellState::Blocked);
        wall.heap.prev = Some(0);
        wall.reset();
        assert_eq!(wall.state, CellState::Blocked);
        assert_eq!(wall.heap.prev, None);

        let mut open = Node::new(2, CellState::Visited);
        open.heap.dist = 3;
        open.heap.left = 9;
        open.heap.mark = true;
        open.reset();
        assert_eq!(open.state, CellState::Undiscovered);
        assert_eq!(open.heap, HeapEntry::detached(2));
    }
}
