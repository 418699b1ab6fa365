//! Randomized-Prim maze carving, one frontier pop per tick.
//!
//! The grid starts fully walled. Carved cells sit on the odd-coordinate
//! lattice; a passage between two lattice cells opens the wall cell between
//! them, so the open cells always form a spanning tree.

use rand::seq::SliceRandom;
use rand::{Rng, RngExt};
use stepmaze_core::{CellState, Grid, GridError, Point};
use stepmaze_paths::Neighbors;

use crate::frontier::RandomFrontierHeap;

/// Result of one [`MazeGenerator::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MazeStatus {
    /// Cells remain on the frontier.
    Continue,
    /// The frontier is empty; the maze is finished. Terminal.
    Complete,
}

/// Step-driven randomized-Prim generator over a [`Grid`].
pub struct MazeGenerator<R: Rng> {
    pub rng: R,
    frontier: RandomFrontierHeap,
    nbuf: Neighbors,
    seed: Point,
    carved: usize,
    complete: bool,
}

impl<R: Rng> MazeGenerator<R> {
    /// Smallest width and height that can host an odd-coordinate seed.
    pub const MIN_SIZE: i32 = 3;

    /// Wall off the whole grid and seed the frontier with a random
    /// odd-coordinate cell.
    pub fn new(grid: &mut Grid, mut rng: R) -> Result<Self, GridError> {
        let (w, h) = (grid.width(), grid.height());
        if w < Self::MIN_SIZE || h < Self::MIN_SIZE {
            return Err(GridError::TooSmall {
                width: w,
                height: h,
                min: Self::MIN_SIZE,
            });
        }
        grid.fill(CellState::Blocked);

        let seed = Point::new(
            2 * rng.random_range(0..(w - 1) / 2) + 1,
            2 * rng.random_range(0..(h - 1) / 2) + 1,
        );
        let mut frontier = RandomFrontierHeap::new();
        if let Some(id) = grid.id(seed) {
            // Its own predecessor, so no neighbor can queue it a second time.
            grid[id].heap.prev = Some(id);
            frontier.push(grid.nodes_mut(), id);
        }
        log::debug!("maze {w}x{h} seeded at {seed}");

        Ok(Self {
            rng,
            frontier,
            nbuf: Neighbors::new(),
            seed,
            carved: 0,
            complete: false,
        })
    }

    /// The seed cell.
    #[inline]
    pub fn seed(&self) -> Point {
        self.seed
    }

    /// Lattice cells carved so far.
    #[inline]
    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Cells waiting on the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Carve one frontier cell and queue its lattice neighbors.
    pub fn tick(&mut self, grid: &mut Grid) -> MazeStatus {
        if self.complete {
            return MazeStatus::Complete;
        }
        let Some(cur) = self.frontier.pop(grid.nodes_mut(), &mut self.rng) else {
            return self.finish();
        };
        self.carved += 1;

        grid[cur].state = CellState::Undiscovered;
        if let Some(prev) = grid[cur].heap.prev {
            grid[prev].state = CellState::Undiscovered;
            grid[(cur + prev) / 2].state = CellState::Undiscovered;
        }

        let cp = grid.point(cur);
        let bounds = grid.bounds();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let candidates = nbuf.cardinal_mut(cp, 2, |q| bounds.contains(q));
        candidates.shuffle(&mut self.rng);
        for &np in candidates.iter() {
            let Some(ni) = grid.id(np) else {
                continue;
            };
            if grid[ni].heap.prev.is_none() {
                self.frontier.push(grid.nodes_mut(), ni);
            }
            // Last writer wins: the cell joins whichever carved neighbor
            // touched it most recently.
            grid[ni].heap.prev = Some(cur);
        }
        self.nbuf = nbuf;

        if self.frontier.is_empty() {
            return self.finish();
        }
        MazeStatus::Continue
    }

    /// Tick until complete. Returns the number of carved cells.
    pub fn run(&mut self, grid: &mut Grid) -> usize {
        while self.tick(grid) == MazeStatus::Continue {}
        self.carved
    }

    fn finish(&mut self) -> MazeStatus {
        if !self.complete {
            log::debug!("maze complete: {} cells carved", self.carved);
        }
        self.complete = true;
        MazeStatus::Complete
    }
}
