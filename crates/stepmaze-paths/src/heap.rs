//! [`MergeableHeap`]: a min-priority queue with decrease-key, threaded
//! through the node arena.
//!
//! The structure is Fibonacci-heap shaped (a root ring of trees, marks and
//! cascading cuts) but `pop` does not consolidate trees by degree: it rescans
//! the root ring linearly for the new minimum, so extraction is O(roots).

use stepmaze_core::{Node, NodeId};

use crate::ring;

/// Min-queue over arena nodes keyed by [`Node::total_cost`].
///
/// The heap itself only stores the head and the element count; all links
/// live in the nodes. A heap is meant to be discarded after one run.
#[derive(Debug, Clone, Default)]
pub struct MergeableHeap {
    head: Option<NodeId>,
    len: usize,
}

impl MergeableHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The current minimum, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<NodeId> {
        self.head
    }

    /// Insert an isolated node as a new root. O(1).
    pub fn push(&mut self, nodes: &mut [Node], id: NodeId) {
        match self.head {
            None => self.head = Some(id),
            Some(h) => {
                ring::insert_left(nodes, h, id);
                if nodes[id].total_cost() < nodes[h].total_cost() {
                    self.head = Some(id);
                }
            }
        }
        self.len += 1;
    }

    /// Remove and return the minimum, or `None` if the heap is empty.
    ///
    /// The head's children are promoted to roots and the whole root ring is
    /// rescanned for the new head.
    pub fn pop(&mut self, nodes: &mut [Node]) -> Option<NodeId> {
        let min = self.head?;
        ring::peel(nodes, min, min);
        let next = nodes[min].heap.right;
        ring::remove_self(nodes, min);
        self.len -= 1;
        self.head = if next == min {
            None
        } else {
            Some(Self::min_root(nodes, next))
        };
        Some(min)
    }

    /// Concatenate `other`'s root ring into this heap. O(1).
    pub fn merge(&mut self, nodes: &mut [Node], other: MergeableHeap) {
        let Some(theirs) = other.head else {
            return;
        };
        let Some(ours) = self.head else {
            *self = other;
            return;
        };
        // Join the two rings: ours.left <-> theirs ... theirs.left <-> ours.
        let our_tail = nodes[ours].heap.left;
        let their_tail = nodes[theirs].heap.left;
        nodes[our_tail].heap.right = theirs;
        nodes[theirs].heap.left = our_tail;
        nodes[their_tail].heap.right = ours;
        nodes[ours].heap.left = their_tail;
        if nodes[theirs].total_cost() < nodes[ours].total_cost() {
            self.head = Some(theirs);
        }
        self.len += other.len;
    }

    /// Decrease-key.
    ///
    /// The candidate cost is `new_dist` alone, or `new_dist + new_est` when a
    /// heuristic is supplied. Returns `false` and leaves the node untouched
    /// unless the candidate is strictly below the node's current total cost.
    /// Without a heuristic only `dist` changes, so the caller is expected to
    /// keep `est` at zero.
    ///
    /// `id` must be a member of this heap.
    pub fn prioritize(
        &mut self,
        nodes: &mut [Node],
        id: NodeId,
        new_dist: i32,
        new_est: Option<i32>,
    ) -> bool {
        let candidate = match new_est {
            Some(est) => new_dist.saturating_add(est),
            None => new_dist,
        };
        if candidate >= nodes[id].total_cost() {
            return false;
        }
        nodes[id].heap.dist = new_dist;
        if let Some(est) = new_est {
            nodes[id].heap.est = est;
        }
        if let Some(parent) = nodes[id].heap.parent {
            self.cut(nodes, id);
            self.cascading_cut(nodes, parent);
        }
        match self.head {
            Some(h) if nodes[id].total_cost() < nodes[h].total_cost() => self.head = Some(id),
            None => self.head = Some(id),
            _ => {}
        }
        true
    }

    /// Detach `id` from its parent and make it a root.
    pub fn cut(&mut self, nodes: &mut [Node], id: NodeId) {
        let Some(parent) = nodes[id].heap.parent else {
            return;
        };
        if nodes[parent].heap.child == Some(id) {
            let sibling = nodes[id].heap.right;
            nodes[parent].heap.child = (sibling != id).then_some(sibling);
        }
        nodes[parent].heap.degree -= 1;
        ring::remove_self(nodes, id);
        nodes[id].heap.parent = None;
        nodes[id].heap.mark = false;
        match self.head {
            Some(h) => ring::insert_left(nodes, h, id),
            None => self.head = Some(id),
        }
    }

    /// Walk up from `id`: mark the first unmarked non-root and stop, cutting
    /// every marked ancestor on the way. Roots are never marked.
    pub fn cascading_cut(&mut self, nodes: &mut [Node], id: NodeId) {
        let mut cur = id;
        while let Some(parent) = nodes[cur].heap.parent {
            if !nodes[cur].heap.mark {
                nodes[cur].heap.mark = true;
                return;
            }
            self.cut(nodes, cur);
            cur = parent;
        }
    }

    /// Linear scan of the ring containing `start` for the cheapest node.
    /// Ties keep the first one met walking rightwards.
    fn min_root(nodes: &[Node], start: NodeId) -> NodeId {
        let mut best = start;
        let mut cur = nodes[start].heap.right;
        while cur != start {
            if nodes[cur].total_cost() < nodes[best].total_cost() {
                best = cur;
            }
            cur = nodes[cur].heap.right;
        }
        best
    }
}
