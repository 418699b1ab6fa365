//! **stepmaze**: carve a maze with randomized Prim, then solve it with
//! Dijkstra or A*, one observable step at a time.
//!
//! [`Session`] owns the grid and whichever stepper is active; a driver calls
//! [`Session::tick`] in a loop and renders the grid between ticks.

pub mod config;
pub mod error;
pub mod session;
pub mod status;

pub use config::Config;
pub use error::{ConfigError, PlacementError};
pub use session::{Outcome, Phase, Session, Status};
pub use status::{StatusLine, StatusLog};
