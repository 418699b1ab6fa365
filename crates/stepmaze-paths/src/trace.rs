use stepmaze_core::{CellState, Grid, NodeId, Point};

/// Result of one [`PathTracer::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceStatus {
    /// One more predecessor was marked.
    Continue,
    /// The chain reached the start. Terminal.
    Done,
    /// The chain ended (or looped) before reaching the start. Terminal; the
    /// cells marked so far stay marked.
    Broken,
}

/// Walks `prev` links from the goal back to the start, marking each
/// predecessor [`CellState::Path`] one cell per step.
#[derive(Debug, Clone)]
pub struct PathTracer {
    start: NodeId,
    cursor: NodeId,
    marked: usize,
    outcome: Option<TraceStatus>,
}

impl PathTracer {
    /// Trace from `goal` towards `start`, both arena indices.
    pub fn new(start: NodeId, goal: NodeId) -> Self {
        Self {
            start,
            cursor: goal,
            marked: 0,
            outcome: None,
        }
    }

    /// Trace between two grid points. `None` if either is out of bounds.
    pub fn between(grid: &Grid, start: Point, goal: Point) -> Option<Self> {
        Some(Self::new(grid.id(start)?, grid.id(goal)?))
    }

    /// Number of cells marked so far.
    #[inline]
    pub fn marked(&self) -> usize {
        self.marked
    }

    /// The node most recently reached.
    #[inline]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Mark one predecessor.
    pub fn step(&mut self, grid: &mut Grid) -> TraceStatus {
        if let Some(done) = self.outcome {
            return done;
        }
        if self.cursor == self.start {
            return self.finish(TraceStatus::Done);
        }
        // A consistent chain is acyclic and shorter than the grid.
        if self.marked >= grid.len() {
            log::warn!("predecessor chain loops; stopped after {} cells", self.marked);
            return self.finish(TraceStatus::Broken);
        }
        let Some(prev) = grid[self.cursor].heap.prev else {
            log::warn!(
                "predecessor chain broken at {} after {} cells",
                grid.point(self.cursor),
                self.marked
            );
            return self.finish(TraceStatus::Broken);
        };

        grid[prev].state = CellState::Path;
        self.cursor = prev;
        self.marked += 1;
        if prev == self.start {
            return self.finish(TraceStatus::Done);
        }
        TraceStatus::Continue
    }

    /// Step until a terminal status.
    pub fn run(&mut self, grid: &mut Grid) -> TraceStatus {
        loop {
            let status = self.step(grid);
            if status != TraceStatus::Continue {
                return status;
            }
        }
    }

    fn finish(&mut self, status: TraceStatus) -> TraceStatus {
        self.outcome = Some(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Algorithm, SearchStatus, SearchStepper};

    #[test]
    fn traces_found_path() {
        let mut g = Grid::new(4, 4);
        let (start, goal) = (Point::new(0, 0), Point::new(3, 3));
        let mut s = SearchStepper::new(&mut g, start, goal, Algorithm::AStar).unwrap();
        assert_eq!(s.run(&mut g), SearchStatus::Found);

        let mut t = PathTracer::between(&g, start, goal).unwrap();
        let mut steps = 1;
        while t.step(&mut g) == TraceStatus::Continue {
            steps += 1;
        }
        // One cell per step, start included, goal excluded.
        assert_eq!(steps, 6);
        assert_eq!(t.marked(), 6);
        assert_eq!(g.count(CellState::Path), 6);
        assert_eq!(g.state_at(start), Some(CellState::Path));
        assert_eq!(g.state_at(goal), Some(CellState::Visited));
        assert_eq!(t.step(&mut g), TraceStatus::Done);
    }

    #[test]
    fn start_equals_goal_is_done() {
        let mut g = Grid::new(2, 2);
        let mut t = PathTracer::new(3, 3);
        assert_eq!(t.step(&mut g), TraceStatus::Done);
        assert_eq!(t.marked(), 0);
    }

    #[test]
    fn missing_predecessor_is_broken() {
        let mut g = Grid::new(5, 1);
        g[4].heap.prev = Some(3);
        g[3].heap.prev = Some(2);
        let mut t = PathTracer::new(0, 4);
        assert_eq!(t.run(&mut g), TraceStatus::Broken);
        assert_eq!(t.cursor(), 2);
        assert_eq!(g.count(CellState::Path), 2);
    }

    #[test]
    fn looping_chain_is_broken() {
        let mut g = Grid::new(3, 1);
        g[2].heap.prev = Some(1);
        g[1].heap.prev = Some(2);
        let mut t = PathTracer::new(0, 2);
        assert_eq!(t.run(&mut g), TraceStatus::Broken);
        assert_eq!(t.marked(), 3);
    }
}
