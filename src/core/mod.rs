mod engine;
mod grid;
mod history;
mod model_helpers;
mod models;
mod route;
mod win_animation;

pub use engine::GameEngine;
pub use grid::GridModel;
pub use history::{BoundedStack, HistoryManager};
pub use models::{ActionKind, ActionRecord, Cell, CellKind, Direction, MoveOutcome, Position};
pub use route::{find_route, next_walk_direction, plan_walk, walk_pending};
pub use win_animation::{FlickerFrame, WinAnimation, FLICKER_FRAMES};
