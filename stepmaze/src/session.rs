//! The phase state machine tying maze generation, endpoint placement, search
//! and path tracing together over one shared [`Grid`].

use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use stepmaze_core::{CellState, Grid, GridError, Point};
use stepmaze_mapgen::{MazeGenerator, MazeStatus};
use stepmaze_paths::{Algorithm, PathTracer, SearchStats, SearchStatus, SearchStepper, TraceStatus};

use crate::config::Config;
use crate::error::PlacementError;

/// Where the session is in its cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Carving a maze, one frontier pop per tick.
    Generating,
    /// Waiting for the start and goal to be placed.
    Placing,
    /// Expanding the search, one heap pop per tick.
    Searching,
    /// Marking the found path, one cell per tick.
    TracingPath,
    /// The run is over; waiting for input.
    Done,
}

/// What a single [`Session::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Work was done and more remains.
    Continue,
    /// The search expanded the goal.
    Found,
    /// The search ran out of frontier.
    Unreachable,
    /// Generation or path tracing finished.
    Complete,
    /// Nothing to do until the driver acts.
    Idle,
}

/// How the last search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was reached in `length` steps after `visited` expansions.
    Found { length: i32, visited: usize },
    /// The goal is walled off from the start.
    Unreachable,
    /// The predecessor chain did not lead back to the start.
    BrokenPath,
}

/// One interactive run: a grid plus whichever stepper is active.
pub struct Session {
    config: Config,
    grid: Grid,
    rng: SmallRng,
    phase: Phase,
    start: Option<Point>,
    goal: Option<Point>,
    maze: Option<MazeGenerator<SmallRng>>,
    search: Option<SearchStepper>,
    tracer: Option<PathTracer>,
    outcome: Option<Outcome>,
}

impl Session {
    /// Allocate a grid for `config` and start generating a maze.
    pub fn new(config: Config) -> Result<Self, GridError> {
        check_size(config.width, config.height)?;
        let grid = Grid::new(config.width, config.height);
        let mut session = Self::with_grid(grid, config);
        session.begin_generating()?;
        Ok(session)
    }

    /// Start in [`Phase::Placing`] on a caller-built grid. Walls in `grid`
    /// are kept; the config's dimensions are overwritten by the grid's.
    pub fn with_grid(mut grid: Grid, mut config: Config) -> Self {
        grid.reset();
        config.width = grid.width();
        config.height = grid.height();
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            grid,
            rng,
            phase: Phase::Placing,
            start: None,
            goal: None,
            maze: None,
            search: None,
            tracer: None,
            outcome: None,
        }
    }

    /// Discard the current run and carve a fresh maze over the same grid.
    /// Fails without touching the current run when the grid is too small.
    pub fn begin_generating(&mut self) -> Result<(), GridError> {
        check_size(self.grid.width(), self.grid.height())?;
        self.clear_run();
        self.grid.reset();
        let rng = SmallRng::seed_from_u64(self.rng.random());
        self.maze = Some(MazeGenerator::new(&mut self.grid, rng)?);
        self.phase = Phase::Generating;
        log::debug!("phase: generating {}x{}", self.grid.width(), self.grid.height());
        Ok(())
    }

    /// Clear search marks, forget the endpoints and wait for new ones.
    pub fn begin_placing(&mut self) {
        self.clear_run();
        self.grid.reset();
        self.phase = Phase::Placing;
        log::debug!("phase: placing");
    }

    /// Search from the placed start to the placed goal. Falls back to
    /// [`begin_placing`](Self::begin_placing) when either is missing.
    pub fn begin_search(&mut self) {
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            self.begin_placing();
            return;
        };
        self.maze = None;
        self.tracer = None;
        self.outcome = None;
        self.grid.reset();

        let algorithm = Algorithm::from_flag(self.config.use_astar);
        match SearchStepper::new(&mut self.grid, start, goal, algorithm) {
            Some(search) => {
                self.search = Some(search);
                self.phase = Phase::Searching;
                log::debug!("phase: searching with {algorithm:?}");
            }
            None => {
                log::warn!("endpoints {start} / {goal} fell outside the grid");
                self.begin_placing();
            }
        }
    }

    /// Advance the active stepper by one step.
    pub fn tick(&mut self) -> Status {
        match self.phase {
            Phase::Generating => self.tick_generating(),
            Phase::Searching => self.tick_searching(),
            Phase::TracingPath => self.tick_tracing(),
            Phase::Placing | Phase::Done => Status::Idle,
        }
    }

    fn tick_generating(&mut self) -> Status {
        let Some(maze) = self.maze.as_mut() else {
            self.begin_placing();
            return Status::Complete;
        };
        match maze.tick(&mut self.grid) {
            MazeStatus::Continue => Status::Continue,
            MazeStatus::Complete => {
                self.begin_placing();
                Status::Complete
            }
        }
    }

    fn tick_searching(&mut self) -> Status {
        let Some(search) = self.search.as_mut() else {
            self.begin_placing();
            return Status::Idle;
        };
        match search.tick(&mut self.grid) {
            SearchStatus::Continue => Status::Continue,
            SearchStatus::Found => {
                let length = search.path_len(&self.grid).unwrap_or_default();
                let visited = search.stats().visited;
                self.outcome = Some(Outcome::Found { length, visited });
                self.tracer = Some(PathTracer::new(search.start(), search.goal()));
                self.phase = Phase::TracingPath;
                log::debug!("phase: tracing path of length {length}");
                Status::Found
            }
            SearchStatus::Unreachable => {
                self.outcome = Some(Outcome::Unreachable);
                self.phase = Phase::Done;
                log::debug!("phase: done, goal unreachable");
                Status::Unreachable
            }
        }
    }

    fn tick_tracing(&mut self) -> Status {
        let Some(tracer) = self.tracer.as_mut() else {
            self.phase = Phase::Done;
            return Status::Complete;
        };
        match tracer.step(&mut self.grid) {
            TraceStatus::Continue => Status::Continue,
            TraceStatus::Done => {
                self.phase = Phase::Done;
                log::debug!("phase: done, {} path cells", tracer.marked());
                Status::Complete
            }
            TraceStatus::Broken => {
                self.outcome = Some(Outcome::BrokenPath);
                self.phase = Phase::Done;
                Status::Complete
            }
        }
    }

    /// Place the start cell.
    pub fn place_start(&mut self, p: Point) -> Result<(), PlacementError> {
        self.check_open(p).inspect_err(|e| log::warn!("start rejected: {e}"))?;
        self.start = Some(p);
        Ok(())
    }

    /// Place the goal cell and begin searching.
    pub fn place_goal(&mut self, p: Point) -> Result<(), PlacementError> {
        self.check_goal(p).inspect_err(|e| log::warn!("goal rejected: {e}"))?;
        self.goal = Some(p);
        self.begin_search();
        Ok(())
    }

    /// Pointer selection: the first pick places the start, the second the
    /// goal.
    pub fn select(&mut self, p: Point) -> Result<(), PlacementError> {
        if self.start.is_none() {
            self.place_start(p)
        } else {
            self.place_goal(p)
        }
    }

    fn check_open(&self, p: Point) -> Result<(), PlacementError> {
        if self.phase != Phase::Placing {
            return Err(PlacementError::WrongPhase);
        }
        match self.grid.state_at(p) {
            None => Err(PlacementError::OutOfBounds(p)),
            Some(CellState::Blocked) => Err(PlacementError::Blocked(p)),
            Some(_) => Ok(()),
        }
    }

    fn check_goal(&self, p: Point) -> Result<(), PlacementError> {
        if self.phase != Phase::Placing {
            return Err(PlacementError::WrongPhase);
        }
        let start = self.start.ok_or(PlacementError::NoStart)?;
        self.check_open(p)?;
        if p == start {
            return Err(PlacementError::SameAsStart);
        }
        Ok(())
    }

    /// Regrid to new dimensions and start generating. The arena is only
    /// reallocated when the size actually changes.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), GridError> {
        check_size(width, height)?;
        if self.grid.resize(width, height) {
            log::debug!("grid resized to {width}x{height}");
        }
        self.config.width = width;
        self.config.height = height;
        self.begin_generating()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// State of the cell at `p`, `None` outside the grid.
    #[inline]
    pub fn state_at(&self, p: Point) -> Option<CellState> {
        self.grid.state_at(p)
    }

    /// The placed start, if any.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The placed goal, if any.
    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// The shared grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// How the most recent search ended, once it has.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Counters of the current or most recent search.
    pub fn search_stats(&self) -> Option<SearchStats> {
        self.search.as_ref().map(SearchStepper::stats)
    }

    /// Algorithm of the current or most recent search.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.search.as_ref().map(SearchStepper::algorithm)
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Choose the algorithm for the next search.
    pub fn set_use_astar(&mut self, use_astar: bool) {
        self.config.use_astar = use_astar;
    }

    fn clear_run(&mut self) {
        self.maze = None;
        self.search = None;
        self.tracer = None;
        self.outcome = None;
        self.start = None;
        self.goal = None;
    }
}

fn check_size(width: i32, height: i32) -> Result<(), GridError> {
    let min = MazeGenerator::<SmallRng>::MIN_SIZE;
    if width < min || height < min {
        return Err(GridError::TooSmall { width, height, min });
    }
    Ok(())
}
