//! [`RandomFrontierHeap`]: the maze carver's frontier.
//!
//! It shares the ring mechanics of [`stepmaze_paths::MergeableHeap`] but never
//! compares keys. Extraction picks a position instead: a random offset skewed
//! towards the most recently pushed end of the ring, somewhere between a stack
//! and a uniform bag. That bias is what gives the carved mazes their long
//! corridors.

use rand::{Rng, RngExt};
use stepmaze_core::{Node, NodeId};
use stepmaze_paths::ring;

/// Recency-biased random frontier over arena nodes.
///
/// Every push lands immediately left of the `oldest` anchor, so walking left
/// from the anchor meets nodes from newest to oldest.
#[derive(Debug, Default)]
pub struct RandomFrontierHeap {
    oldest: Option<NodeId>,
    len: usize,
}

impl RandomFrontierHeap {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the frontier is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.oldest.is_none()
    }

    /// The anchor: the earliest push still queued.
    #[inline]
    pub fn oldest(&self) -> Option<NodeId> {
        self.oldest
    }

    /// Append an isolated node. O(1).
    pub fn push(&mut self, nodes: &mut [Node], id: NodeId) {
        match self.oldest {
            None => self.oldest = Some(id),
            Some(anchor) => ring::insert_left(nodes, anchor, id),
        }
        self.len += 1;
    }

    /// Remove a node chosen with a fresh draw from `rng`.
    pub fn pop(&mut self, nodes: &mut [Node], rng: &mut impl Rng) -> Option<NodeId> {
        let r: f64 = rng.random();
        self.pop_at(nodes, r)
    }

    /// Remove the node selected by the draw `r` in `[0, 1)`.
    ///
    /// `offset = floor((r - 0.5)^2 * len)` and the target sits `offset + 1`
    /// links left of the anchor, so `offset == 0` takes the newest node.
    /// Since `offset <= len / 4`, the anchor itself is only taken when it is
    /// the last node left.
    pub fn pop_at(&mut self, nodes: &mut [Node], r: f64) -> Option<NodeId> {
        let anchor = self.oldest?;
        let offset = Self::offset(r, self.len);

        let mut target = anchor;
        for _ in 0..=offset {
            target = nodes[target].heap.left;
        }

        let right = nodes[target].heap.right;
        ring::peel(nodes, target, target);
        ring::remove_self(nodes, target);
        self.len -= 1;

        if target == anchor {
            self.oldest = (right != target).then_some(right);
        }
        Some(target)
    }

    /// `floor((r - 0.5)^2 * len)`, with `r` clamped into `[0, 1)`.
    fn offset(r: f64, len: usize) -> usize {
        let r = r.clamp(0.0, 1.0 - f64::EPSILON);
        let skew = (r - 0.5) * (r - 0.5);
        (skew * len as f64).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use stepmaze_core::Grid;

    fn filled(g: &mut Grid, n: usize) -> RandomFrontierHeap {
        let mut f = RandomFrontierHeap::new();
        for id in 0..n {
            f.push(g.nodes_mut(), id);
        }
        f
    }

    #[test]
    fn offset_is_skewed_to_zero() {
        assert_eq!(RandomFrontierHeap::offset(0.5, 100), 0);
        assert_eq!(RandomFrontierHeap::offset(0.0, 100), 25);
        assert_eq!(RandomFrontierHeap::offset(0.9, 100), 16);
        assert_eq!(RandomFrontierHeap::offset(0.3, 10), 0);
        assert!(RandomFrontierHeap::offset(0.999_999, 8) <= 2);
    }

    #[test]
    fn centered_draw_takes_newest() {
        let mut g = Grid::new(5, 1);
        let mut f = filled(&mut g, 5);
        assert_eq!(f.oldest(), Some(0));
        assert_eq!(f.pop_at(g.nodes_mut(), 0.5), Some(4));
        assert_eq!(f.pop_at(g.nodes_mut(), 0.5), Some(3));
        assert_eq!(f.len(), 3);
        assert!(g[4].is_isolated());
    }

    #[test]
    fn edge_draw_reaches_deeper() {
        let mut g = Grid::new(8, 1);
        let mut f = filled(&mut g, 8);
        // offset = floor(0.25 * 8) = 2: third newest.
        assert_eq!(f.pop_at(g.nodes_mut(), 0.0), Some(5));
        assert_eq!(ring::members(g.nodes(), 0), vec![0, 1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn anchor_goes_last() {
        let mut g = Grid::new(6, 1);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut f = filled(&mut g, 6);
        let mut order = Vec::new();
        while let Some(id) = f.pop(g.nodes_mut(), &mut rng) {
            order.push(id);
        }
        assert_eq!(order.len(), 6);
        assert_eq!(order.last(), Some(&0));
        assert!(f.is_empty());
        assert_eq!(f.len(), 0);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn pop_empty_is_none() {
        let mut g = Grid::new(1, 1);
        let mut f = RandomFrontierHeap::new();
        assert_eq!(f.pop_at(g.nodes_mut(), 0.1), None);
        f.push(g.nodes_mut(), 0);
        assert_eq!(f.pop_at(g.nodes_mut(), 0.1), Some(0));
        assert!(f.is_empty());
        // Reusable after draining.
        f.push(g.nodes_mut(), 0);
        assert_eq!(f.oldest(), Some(0));
    }
}
