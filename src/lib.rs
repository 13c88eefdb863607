//! Warehouse box-pushing puzzle: grid rules, route-assisted walking and a
//! bounded undo/redo history, plus a terminal front end.

pub mod config;
pub mod console_interface;
pub mod core;
pub mod error;
pub mod game;
pub mod level;
pub mod models;
pub mod pacing;

#[cfg(test)]
mod test;

pub use error::{ConfigError, GameError, LevelError, RouteError};
pub use game::{Game, Tick};
pub use level::{Level, LevelSet, parse_level};
