use crate::core::{Direction, FlickerFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Move(Direction),
    Undo,
    Redo,
    Restart,
    NextLevel,
}

pub struct GameRenderState {
    pub level_number: u32,
    pub won: bool,
    pub message: Option<String>,
    pub flicker: Option<FlickerFrame>,
}
