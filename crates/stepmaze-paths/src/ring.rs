//! Sibling-ring and tree primitives over the node arena.
//!
//! A ring is a circular doubly-linked list threaded through
//! [`HeapEntry::left`](stepmaze_core::HeapEntry) / `right`. Each function
//! takes the arena slice and touches only the nodes it names plus their
//! immediate neighbours.

use stepmaze_core::{Node, NodeId};

/// Splice `node` into the ring immediately left of (before) `ring`.
///
/// `node` must currently be isolated.
#[inline]
pub fn insert_left(nodes: &mut [Node], ring: NodeId, node: NodeId) {
    let l = nodes[ring].heap.left;
    nodes[node].heap.left = l;
    nodes[node].heap.right = ring;
    nodes[l].heap.right = node;
    nodes[ring].heap.left = node;
}

/// Excise `node` from its ring, leaving it as a self-ring.
///
/// Safe to call on an already isolated node.
#[inline]
pub fn remove_self(nodes: &mut [Node], node: NodeId) -> NodeId {
    let (l, r) = (nodes[node].heap.left, nodes[node].heap.right);
    if r != node {
        nodes[l].heap.right = r;
        nodes[r].heap.left = l;
    }
    nodes[node].heap.left = node;
    nodes[node].heap.right = node;
    node
}

/// Move every child of `node` into the ring containing `ring`.
///
/// Moved children become roots: their `parent` is cleared and they are
/// unmarked. Afterwards `node` has no child and degree 0.
pub fn peel(nodes: &mut [Node], node: NodeId, ring: NodeId) {
    let Some(child) = nodes[node].heap.child else {
        return;
    };
    loop {
        let next = nodes[child].heap.left;
        if next == child {
            break;
        }
        remove_self(nodes, next);
        make_root(nodes, next);
        insert_left(nodes, ring, next);
    }
    make_root(nodes, child);
    insert_left(nodes, ring, child);
    nodes[node].heap.child = None;
    nodes[node].heap.degree = 0;
}

/// Attach isolated `node` as a child of `parent`.
///
/// The first child becomes the ring anchor; later ones are spliced into the
/// existing child ring.
pub fn insert_child(nodes: &mut [Node], parent: NodeId, node: NodeId) {
    match nodes[parent].heap.child {
        None => nodes[parent].heap.child = Some(node),
        Some(anchor) => insert_left(nodes, anchor, node),
    }
    nodes[node].heap.parent = Some(parent);
    nodes[parent].heap.degree += 1;
}

/// Collect the ring containing `start`, walking rightwards.
pub fn members(nodes: &[Node], start: NodeId) -> Vec<NodeId> {
    let mut out = vec![start];
    let mut cur = nodes[start].heap.right;
    while cur != start {
        out.push(cur);
        cur = nodes[cur].heap.right;
    }
    out
}

#[inline]
fn make_root(nodes: &mut [Node], id: NodeId) {
    nodes[id].heap.parent = None;
    nodes[id].heap.mark = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepmaze_core::Grid;

    fn ring_ok(nodes: &[Node], start: NodeId) -> bool {
        members(nodes, start)
            .iter()
            .all(|&i| nodes[nodes[i].heap.right].heap.left == i)
    }

    #[test]
    fn insert_left_orders_before_anchor() {
        let mut g = Grid::new(4, 1);
        let n = g.nodes_mut();
        insert_left(n, 0, 1);
        insert_left(n, 0, 2);
        insert_left(n, 0, 3);
        assert_eq!(members(n, 0), vec![0, 1, 2, 3]);
        assert_eq!(n[0].heap.left, 3);
        assert!(ring_ok(n, 0));
    }

    #[test]
    fn remove_self_isolates() {
        let mut g = Grid::new(3, 1);
        let n = g.nodes_mut();
        insert_left(n, 0, 1);
        insert_left(n, 0, 2);
        remove_self(n, 1);
        assert!(n[1].is_isolated());
        assert_eq!(members(n, 0), vec![0, 2]);
        assert!(ring_ok(n, 0));
        // Second removal is a no-op.
        remove_self(n, 1);
        assert!(n[1].is_isolated());
        assert_eq!(members(n, 0), vec![0, 2]);
    }

    #[test]
    fn insert_child_tracks_degree() {
        let mut g = Grid::new(4, 1);
        let n = g.nodes_mut();
        insert_child(n, 0, 1);
        insert_child(n, 0, 2);
        insert_child(n, 0, 3);
        assert_eq!(n[0].heap.child, Some(1));
        assert_eq!(n[0].heap.degree, 3);
        assert_eq!(members(n, 1).len(), 3);
        assert!(members(n, 1).iter().all(|&c| n[c].heap.parent == Some(0)));
    }

    #[test]
    fn peel_moves_children_to_ring() {
        let mut g = Grid::new(6, 1);
        let n = g.nodes_mut();
        insert_left(n, 0, 5);
        insert_child(n, 0, 1);
        insert_child(n, 0, 2);
        insert_child(n, 0, 3);
        n[2].heap.mark = true;
        peel(n, 0, 0);
        assert_eq!(n[0].heap.child, None);
        assert_eq!(n[0].heap.degree, 0);
        let mut ring = members(n, 0);
        ring.sort_unstable();
        assert_eq!(ring, vec![0, 1, 2, 3, 5]);
        assert!(ring_ok(n, 0));
        for c in [1, 2, 3] {
            assert_eq!(n[c].heap.parent, None);
            assert!(!n[c].heap.mark);
        }
    }

    #[test]
    fn peel_without_children_is_noop() {
        let mut g = Grid::new(2, 1);
        let n = g.nodes_mut();
        insert_left(n, 0, 1);
        peel(n, 1, 0);
        assert_eq!(members(n, 0), vec![0, 1]);
    }
}
