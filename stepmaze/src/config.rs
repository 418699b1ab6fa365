//! Session configuration.

use std::str::FromStr;

use crate::error::ConfigError;

/// Knobs for one [`Session`](crate::Session).
///
/// `use_astar` is read once each time a search begins; flipping it mid-search
/// only affects the next run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maze width in cells.
    pub width: i32,
    /// Maze height in cells.
    pub height: i32,
    /// Guide the search with the Manhattan heuristic.
    pub use_astar: bool,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Pause between ticks in the interactive driver.
    pub tick_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 11,
            height: 11,
            use_astar: false,
            seed: None,
            tick_delay_ms: 30,
        }
    }
}

impl Config {
    /// Build a config from command-line arguments (program name excluded).
    ///
    /// Recognized: `--width N`, `--height N`, `--astar`, `--seed N`,
    /// `--delay MS`. Anything unset keeps its default.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cfg = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" | "-w" => cfg.width = value(&arg, args.next())?,
                "--height" | "-H" => cfg.height = value(&arg, args.next())?,
                "--seed" | "-s" => cfg.seed = Some(value(&arg, args.next())?),
                "--delay" | "-d" => cfg.tick_delay_ms = value(&arg, args.next())?,
                "--astar" | "-a" => cfg.use_astar = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(cfg)
    }
}

fn value<T: FromStr>(flag: &str, raw: Option<String>) -> Result<T, ConfigError> {
    let raw = raw.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: raw,
    })
}
