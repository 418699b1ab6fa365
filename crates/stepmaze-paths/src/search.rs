use stepmaze_core::{CellState, Grid, NodeId, Point};

use crate::distance::manhattan;
use crate::heap::MergeableHeap;
use crate::neighbors::Neighbors;

/// Which shortest-path algorithm a [`SearchStepper`] runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Uniform-cost expansion, `est` fixed at 0.
    #[default]
    Dijkstra,
    /// Expansion guided by the Manhattan distance to the goal.
    AStar,
}

impl Algorithm {
    /// `AStar` when `use_astar` is set, `Dijkstra` otherwise.
    pub const fn from_flag(use_astar: bool) -> Self {
        if use_astar { Self::AStar } else { Self::Dijkstra }
    }
}

/// Result of one [`SearchStepper::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// More work remains.
    Continue,
    /// The goal was expanded. Terminal.
    Found,
    /// The frontier ran dry before the goal was expanded. Terminal.
    Unreachable,
}

impl SearchStatus {
    /// Whether further ticks can change anything.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Counters accumulated over one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Heap pops, including stale ones.
    pub pops: usize,
    /// Nodes marked Visited.
    pub visited: usize,
    /// Pops that hit an already closed node.
    pub stale: usize,
    /// Successful decrease-key relaxations.
    pub relaxed: usize,
}

/// Incremental Dijkstra / A* over a [`Grid`].
///
/// Each [`tick`](Self::tick) pops one node and relaxes its 4-neighbors, so a
/// driver can render or cancel between steps. The stepper owns its heap;
/// all per-node state lives in the grid.
pub struct SearchStepper {
    heap: MergeableHeap,
    start: NodeId,
    goal: NodeId,
    goal_pos: Point,
    algorithm: Algorithm,
    stats: SearchStats,
    nbuf: Neighbors,
    outcome: Option<SearchStatus>,
}

impl SearchStepper {
    /// Seed a search from `start` to `goal`.
    ///
    /// The grid should have been [`reset`](Grid::reset) since the previous
    /// run. Returns `None` if either endpoint is out of bounds.
    pub fn new(grid: &mut Grid, start: Point, goal: Point, algorithm: Algorithm) -> Option<Self> {
        let si = grid.id(start)?;
        let gi = grid.id(goal)?;

        let mut heap = MergeableHeap::new();
        {
            let node = &mut grid[si];
            node.state = CellState::Discovered;
            node.heap.dist = 0;
            node.heap.est = match algorithm {
                Algorithm::Dijkstra => 0,
                Algorithm::AStar => manhattan(start, goal),
            };
        }
        heap.push(grid.nodes_mut(), si);
        log::debug!("search {algorithm:?} from {start} to {goal}");

        Some(Self {
            heap,
            start: si,
            goal: gi,
            goal_pos: goal,
            algorithm,
            stats: SearchStats::default(),
            nbuf: Neighbors::new(),
            outcome: None,
        })
    }

    /// The algorithm chosen at construction.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Arena index of the start node.
    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Arena index of the goal node.
    #[inline]
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    /// Counters so far.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Entries still queued (stale ones included).
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.heap.len()
    }

    /// Shortest path length in steps, once the goal has been found.
    pub fn path_len(&self, grid: &Grid) -> Option<i32> {
        (self.outcome == Some(SearchStatus::Found)).then(|| grid[self.goal].heap.dist)
    }

    /// Perform one pop and its relaxations.
    ///
    /// Terminal statuses are sticky: ticking a finished search returns the
    /// same status again without touching the grid.
    pub fn tick(&mut self, grid: &mut Grid) -> SearchStatus {
        if let Some(done) = self.outcome {
            return done;
        }

        let Some(cur) = self.heap.pop(grid.nodes_mut()) else {
            log::debug!("search exhausted after {} visits", self.stats.visited);
            return self.finish(SearchStatus::Unreachable);
        };
        self.stats.pops += 1;

        // Stale entry: skip.
        if grid[cur].state.is_closed() {
            self.stats.stale += 1;
            return SearchStatus::Continue;
        }
        grid[cur].state = CellState::Visited;
        self.stats.visited += 1;

        if cur == self.goal {
            log::debug!(
                "goal reached: dist {} after {} visits",
                grid[cur].heap.dist,
                self.stats.visited
            );
            return self.finish(SearchStatus::Found);
        }

        let cp = grid.point(cur);
        let bounds = grid.bounds();
        let new_dist = grid[cur].heap.dist.saturating_add(1);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        for &np in nbuf.cardinal(cp, 1, |q| bounds.contains(q)) {
            if let Some(ni) = grid.id(np) {
                self.relax(grid, cur, ni, new_dist);
            }
        }
        self.nbuf = nbuf;

        SearchStatus::Continue
    }

    /// Tick until a terminal status.
    pub fn run(&mut self, grid: &mut Grid) -> SearchStatus {
        loop {
            let status = self.tick(grid);
            if status.is_terminal() {
                return status;
            }
        }
    }

    /// Discover `next` or lower its key through `cur`.
    fn relax(&mut self, grid: &mut Grid, cur: NodeId, next: NodeId, new_dist: i32) {
        if grid[next].state.is_closed() {
            return;
        }
        let est = match self.algorithm {
            Algorithm::Dijkstra => None,
            Algorithm::AStar => Some(manhattan(grid.point(next), self.goal_pos)),
        };

        if grid[next].state != CellState::Discovered {
            let node = &mut grid[next];
            node.heap.dist = new_dist;
            node.heap.est = est.unwrap_or(0);
            node.heap.prev = Some(cur);
            node.state = CellState::Discovered;
            self.heap.push(grid.nodes_mut(), next);
        } else if self.heap.prioritize(grid.nodes_mut(), next, new_dist, est) {
            grid[next].heap.prev = Some(cur);
            self.stats.relaxed += 1;
        }
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.outcome = Some(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(n: i32) -> Grid {
        Grid::new(n, n)
    }

    fn solve(grid: &mut Grid, from: Point, to: Point, algo: Algorithm) -> (SearchStatus, SearchStepper) {
        let mut s = SearchStepper::new(grid, from, to, algo).unwrap();
        let status = s.run(grid);
        (status, s)
    }

    #[test]
    fn three_by_three_dijkstra() {
        let mut g = open(3);
        let (status, s) = solve(&mut g, Point::new(0, 0), Point::new(2, 2), Algorithm::Dijkstra);
        assert_eq!(status, SearchStatus::Found);
        assert_eq!(s.path_len(&g), Some(4));
        assert!(g.count(CellState::Visited) <= 9);
        assert_eq!(s.stats().visited, g.count(CellState::Visited));
    }

    #[test]
    fn corner_to_corner_is_manhattan() {
        for n in [2, 5, 12] {
            for algo in [Algorithm::Dijkstra, Algorithm::AStar] {
                let mut g = open(n);
                let (status, s) =
                    solve(&mut g, Point::new(0, 0), Point::new(n - 1, n - 1), algo);
                assert_eq!(status, SearchStatus::Found);
                assert_eq!(s.path_len(&g), Some(2 * (n - 1)), "{algo:?} on {n}x{n}");
            }
        }
    }

    #[test]
    fn astar_visits_no_more_than_dijkstra() {
        for n in [4, 9, 16] {
            let goal = Point::new(n - 1, n - 1);
            let mut gd = open(n);
            let (_, d) = solve(&mut gd, Point::ZERO, goal, Algorithm::Dijkstra);
            let mut ga = open(n);
            let (_, a) = solve(&mut ga, Point::ZERO, goal, Algorithm::AStar);
            assert!(a.stats().visited <= d.stats().visited);
            assert_eq!(a.path_len(&ga), d.path_len(&gd));
        }
    }

    #[test]
    fn walls_are_routed_around() {
        let mut g = Grid::parse(
            "\
            .....\n\
            ####.\n\
            .....\n\
            .####\n\
            .....\n",
        )
        .unwrap();
        for algo in [Algorithm::Dijkstra, Algorithm::AStar] {
            g.reset();
            let (status, s) = solve(&mut g, Point::new(0, 0), Point::new(4, 4), algo);
            assert_eq!(status, SearchStatus::Found);
            assert_eq!(s.path_len(&g), Some(16));
            assert_eq!(g.count(CellState::Blocked), 8);
        }
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let mut g = Grid::parse(
            "\
            ..#..\n\
            ..#..\n\
            ..#..\n",
        )
        .unwrap();
        let (status, s) = solve(&mut g, Point::new(0, 0), Point::new(4, 2), Algorithm::AStar);
        assert_eq!(status, SearchStatus::Unreachable);
        assert_eq!(s.path_len(&g), None);
        assert_eq!(s.stats().visited, 6);
        // Sticky.
        let mut s = s;
        assert_eq!(s.tick(&mut g), SearchStatus::Unreachable);
    }

    #[test]
    fn predecessors_form_a_chain_to_start() {
        let mut g = open(6);
        let start = Point::new(1, 4);
        let goal = Point::new(5, 0);
        let (_, s) = solve(&mut g, start, goal, Algorithm::Dijkstra);
        let mut cur = s.goal();
        let mut steps = 0;
        while let Some(p) = g[cur].heap.prev {
            assert_eq!(g[p].heap.dist + 1, g[cur].heap.dist);
            cur = p;
            steps += 1;
        }
        assert_eq!(cur, s.start());
        assert_eq!(steps, 8);
    }

    #[test]
    fn closed_nodes_are_skipped_as_stale() {
        let mut g = open(3);
        let mut s = SearchStepper::new(&mut g, Point::ZERO, Point::new(2, 2), Algorithm::Dijkstra)
            .unwrap();
        assert_eq!(s.tick(&mut g), SearchStatus::Continue);
        // Close a queued neighbor behind the heap's back.
        let right = g.id(Point::new(1, 0)).unwrap();
        g[right].state = CellState::Blocked;
        let mut stale = 0;
        while s.tick(&mut g) == SearchStatus::Continue {
            stale = s.stats().stale;
        }
        assert_eq!(stale, 1);
        assert_eq!(s.path_len(&g), Some(4));
    }

    #[test]
    fn cheaper_route_relaxes_discovered_node() {
        // 3x2, ids row-major: (1,1) = 4 is first reached through (0,1) = 3.
        let mut g = Grid::new(3, 2);
        let mut s = SearchStepper::new(&mut g, Point::ZERO, Point::new(2, 1), Algorithm::Dijkstra)
            .unwrap();
        assert_eq!(s.tick(&mut g), SearchStatus::Continue);
        assert_eq!(s.tick(&mut g), SearchStatus::Continue);
        assert_eq!(g[4].state, CellState::Discovered);
        assert_eq!(g[4].heap.prev, Some(3));

        // Inflate its key and leave a stale predecessor behind.
        g[4].heap.dist = 10;
        g[4].heap.prev = Some(5);

        // Popping (1,0) offers dist 2 through itself.
        assert_eq!(s.tick(&mut g), SearchStatus::Continue);
        assert_eq!(g[4].heap.dist, 2);
        assert_eq!(g[4].heap.prev, Some(1));
        assert_eq!(s.stats().relaxed, 1);

        // The improved node is expanded next.
        assert_eq!(s.tick(&mut g), SearchStatus::Continue);
        assert_eq!(g[4].state, CellState::Visited);
        assert_eq!(g.state_at(Point::new(2, 0)), Some(CellState::Discovered));
        assert_eq!(s.run(&mut g), SearchStatus::Found);
        assert_eq!(s.path_len(&g), Some(3));
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut g = open(3);
        assert!(SearchStepper::new(&mut g, Point::new(3, 0), Point::ZERO, Algorithm::AStar).is_none());
        assert!(SearchStepper::new(&mut g, Point::ZERO, Point::new(0, -1), Algorithm::AStar).is_none());
    }
}
