use crate::core::{GameEngine, Position};

pub const FLICKER_FRAMES: usize = 12;

/// One frame of the solved flicker. While `inverted` is set the renderer
/// draws each listed cell as if its box had been toggled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlickerFrame {
    pub inverted: bool,
    pub cells: Vec<Position>,
}

/// Finite sequence of flicker frames. Has no effect on the grid; the final
/// frame is always the normal look.
#[derive(Clone, Debug)]
pub struct WinAnimation {
    cells: Vec<Position>,
    emitted: usize,
}

impl WinAnimation {
    pub fn new(engine: &GameEngine) -> Self {
        let cells = engine
            .grid()
            .iter()
            .filter(|(_, c)| c.has_box || c.is_empty_shelf())
            .map(|(pos, _)| pos)
            .collect();
        WinAnimation { cells, emitted: 0 }
    }
}

impl Iterator for WinAnimation {
    type Item = FlickerFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= FLICKER_FRAMES {
            return None;
        }
        self.emitted += 1;
        Some(FlickerFrame {
            inverted: self.emitted % 2 == 1,
            cells: self.cells.clone(),
        })
    }
}
