//! Error types for the warehouse game.

use std::path::PathBuf;

use derive_more::{Display, Error};

use crate::core::Position;

/// Why a requested route could not be walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RouteError {
    /// The target is outside the grid, a wall, or holds a box.
    #[display("Invalid destination {}:{}", position.row, position.col)]
    InvalidDestination { position: Position },
    /// No chain of free cells joins the worker to the target, or the target
    /// is the worker's own cell.
    #[display("No route from {}:{} to {}:{}", start.row, start.col, end.row, end.col)]
    NoRoute { start: Position, end: Position },
}

/// Failure to turn level text into a grid.
#[derive(Debug, Display, Error)]
pub enum LevelError {
    #[display("Invalid char at {row},{col}={ch:?}")]
    InvalidChar { row: usize, col: usize, ch: char },
    #[display("Level has no worker")]
    MissingWorker,
    #[display("Second worker at {row},{col}")]
    DuplicateWorker { row: usize, col: usize },
    #[display("No level {number} in {}", dir.display())]
    NoSuchLevel { number: u32, dir: PathBuf },
    #[display("Could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

/// Errors reported by the [`crate::Game`] session.
#[derive(Debug, Display, Error)]
pub enum GameError {
    /// An auto-walk or the win animation is still running.
    #[display("Busy, finish or cancel the current sequence first")]
    Busy,
    #[display("{_0}")]
    Route(RouteError),
    #[display("{_0}")]
    Level(LevelError),
}

impl From<RouteError> for GameError {
    fn from(err: RouteError) -> Self {
        GameError::Route(err)
    }
}

impl From<LevelError> for GameError {
    fn from(err: LevelError) -> Self {
        GameError::Level(err)
    }
}

/// Invalid or unreadable settings.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("history size must be at least 1, got {size}")]
    InvalidHistorySize { size: usize },
    #[display("Could not read config {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[display("Could not parse config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}
