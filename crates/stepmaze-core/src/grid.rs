//! The [`Grid`] type: the node arena shared by the maze carver and the search.
//!
//! Nodes are allocated once per grid size and mutated in place across runs;
//! heaps built on top of the grid only ever hold [`NodeId`]s into it.

use std::ops::{Index, IndexMut};

use crate::cell::CellState;
use crate::error::GridError;
use crate::geom::{Point, Range};
use crate::node::{Node, NodeId};

/// A row-major arena of [`Node`]s covering `[0, width) × [0, height)`.
#[derive(Debug, Clone)]
pub struct Grid {
    nodes: Vec<Node>,
    bounds: Range,
}

impl Grid {
    /// Create an all-open grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, CellState::Undiscovered)
    }

    /// Create a grid where every cell starts in `state`.
    pub fn filled(width: i32, height: i32, state: CellState) -> Self {
        let bounds = Range::sized(width, height);
        let nodes = (0..bounds.len()).map(|i| Node::new(i, state)).collect();
        Self { nodes, bounds }
    }

    /// Create a grid from a row-major blocked-cell mask (`true` = wall).
    pub fn with_mask(width: i32, height: i32, blocked: &[bool]) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height);
        if blocked.len() != grid.len() {
            return Err(GridError::MaskSize {
                expected: grid.len(),
                found: blocked.len(),
            });
        }
        for (node, &wall) in grid.nodes.iter_mut().zip(blocked) {
            if wall {
                node.state = CellState::Blocked;
            }
        }
        Ok(grid)
    }

    /// Parse an ASCII picture: `#` is a wall, any other character is open.
    /// Blank lines are ignored.
    pub fn parse(picture: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut mask = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            mask.extend(line.chars().map(|c| c == '#'));
        }
        Self::with_mask(width as i32, rows.len() as i32, &mask)
    }

    /// Re-dimension the grid. Returns `false` (and leaves every node
    /// untouched) when the size is unchanged.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        let bounds = Range::sized(width, height);
        if bounds == self.bounds {
            return false;
        }
        self.nodes.clear();
        self.nodes
            .extend((0..bounds.len()).map(|i| Node::new(i, CellState::Undiscovered)));
        self.bounds = bounds;
        true
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Arena index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        self.bounds.index_of(p)
    }

    /// Grid coordinate of a node.
    #[inline]
    pub fn point(&self, id: NodeId) -> Point {
        self.bounds.point_at(id)
    }

    /// The node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Node> {
        self.id(p).map(|i| &self.nodes[i])
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state_at(&self, p: Point) -> Option<CellState> {
        self.at(p).map(|n| n.state)
    }

    /// Set the state at `p`. Does nothing if out of bounds.
    pub fn set_state(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.id(p) {
            self.nodes[i].state = state;
        }
    }

    /// All nodes, row-major.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All nodes, mutably. Heaps operate on this slice.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Clear search and heap state on every node, keeping walls.
    pub fn reset(&mut self) {
        for n in &mut self.nodes {
            n.reset();
        }
    }

    /// Clear heap state on every node and set every cell to `state`.
    pub fn fill(&mut self, state: CellState) {
        for n in &mut self.nodes {
            n.state = state;
            n.reset();
        }
    }

    /// Count cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.nodes.iter().filter(|n| n.state == state).count()
    }

    /// One line per row, one [`CellState::glyph`] per cell.
    pub fn render(&self) -> String {
        let w = self.width().max(1) as usize;
        let mut out = String::with_capacity(self.len() + self.height().max(0) as usize);
        for row in self.nodes.chunks(w) {
            out.extend(row.iter().map(|n| n.state.glyph()));
            out.push('\n');
        }
        out
    }
}

impl Index<NodeId> for Grid {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for Grid {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_size() {
        let g = Grid::new(10, 5);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 5);
        assert_eq!(g.len(), 50);
        assert_eq!(g.count(CellState::Undiscovered), 50);
        assert_eq!(g[12].index(), 12);
    }

    #[test]
    fn test_id_and_point() {
        let g = Grid::new(4, 3);
        let p = Point::new(3, 2);
        assert_eq!(g.id(p), Some(11));
        assert_eq!(g.point(11), p);
        assert_eq!(g.id(Point::new(4, 0)), None);
        assert_eq!(g.state_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_mask() {
        let g = Grid::with_mask(2, 2, &[false, true, true, false]).unwrap();
        assert_eq!(g.state_at(Point::new(1, 0)), Some(CellState::Blocked));
        assert_eq!(g.state_at(Point::new(1, 1)), Some(CellState::Undiscovered));
        let err = Grid::with_mask(2, 2, &[false]).unwrap_err();
        assert_eq!(
            err,
            GridError::MaskSize {
                expected: 4,
                found: 1
            }
        );
    }

    #[test]
    fn test_parse_and_render() {
        let pic = "\
            .#.\n\
            ...\n\
            #..\n";
        let g = Grid::parse(pic).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.count(CellState::Blocked), 2);
        assert_eq!(g.render(), ".#.\n...\n#..\n");
    }

    #[test]
    fn test_parse_ragged() {
        let err = Grid::parse("...\n..\n").unwrap_err();
        assert!(matches!(err, GridError::Ragged { row: 1, .. }));
    }

    #[test]
    fn test_reset_keeps_walls_and_allocation() {
        let mut g = Grid::parse("..#\n...").unwrap();
        let before = g.nodes().as_ptr();
        g.set_state(Point::new(0, 0), CellState::Visited);
        g[1].heap.prev = Some(0);
        g[1].heap.dist = 4;
        g.reset();
        assert_eq!(g.nodes().as_ptr(), before);
        assert_eq!(g.state_at(Point::new(0, 0)), Some(CellState::Undiscovered));
        assert_eq!(g.state_at(Point::new(2, 0)), Some(CellState::Blocked));
        assert_eq!(g[1].heap.prev, None);
        assert!(g[1].is_isolated());
    }

    #[test]
    fn test_fill() {
        let mut g = Grid::new(3, 3);
        g.fill(CellState::Blocked);
        assert_eq!(g.count(CellState::Blocked), 9);
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut g = Grid::new(5, 5);
        g.set_state(Point::new(1, 1), CellState::Blocked);
        assert!(!g.resize(5, 5));
        assert_eq!(g.state_at(Point::new(1, 1)), Some(CellState::Blocked));
        assert!(g.resize(6, 4));
        assert_eq!(g.len(), 24);
        assert_eq!(g.count(CellState::Blocked), 0);
    }
}
