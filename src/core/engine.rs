use tracing::{info, trace};

use crate::core::{ActionKind, ActionRecord, Cell, Direction, GridModel, MoveOutcome, Position};

/// Owns the grid and the worker and applies the move/push/pull primitives.
///
/// Every primitive queues the cells whose appearance changed; a renderer
/// collects them with [`GameEngine::take_redraws`].
#[derive(Clone, Debug)]
pub struct GameEngine {
    grid: GridModel,
    worker: Position,
    facing: Direction,
    redraws: Vec<Position>,
}

impl GameEngine {
    pub fn new(grid: GridModel, worker: Position) -> Self {
        GameEngine {
            grid,
            worker,
            facing: Direction::Left,
            redraws: Vec::new(),
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn get_cell(&self, pos: Position) -> Option<&Cell> {
        self.grid.get(pos)
    }

    pub fn worker_pos(&self) -> Position {
        self.worker
    }

    pub fn worker_facing(&self) -> Direction {
        self.facing
    }

    pub fn set_worker_facing(&mut self, direction: Direction) {
        self.facing = direction;
        self.redraws.push(self.worker);
    }

    fn is_free(&self, pos: Position) -> bool {
        self.grid.get(pos).is_some_and(Cell::is_free)
    }

    fn has_box(&self, pos: Position) -> bool {
        self.grid.get(pos).is_some_and(|c| c.has_box)
    }

    /// Moves the worker, pushing a box if one is ahead and the cell beyond it
    /// is free. Blocked moves are ignored and return `None`.
    pub fn move_or_push(&mut self, direction: Direction) -> Option<MoveOutcome> {
        self.set_worker_facing(direction);
        let next = self.worker.step(direction);
        let beyond = next.step(direction);

        if self.has_box(next) && self.is_free(beyond) {
            self.push(direction);
            let solved = self.is_solved();
            if solved {
                info!("warehouse solved");
            }
            Some(MoveOutcome {
                record: ActionRecord::new(ActionKind::Push, direction),
                solved,
            })
        } else if self.is_free(next) {
            self.walk(direction);
            Some(MoveOutcome {
                record: ActionRecord::new(ActionKind::Move, direction),
                solved: false,
            })
        } else {
            trace!(?direction, "blocked");
            None
        }
    }

    /// Steps the worker one cell. Returns false, leaving everything untouched,
    /// when the destination is not free.
    pub fn walk(&mut self, direction: Direction) -> bool {
        let dest = self.worker.step(direction);
        if !self.is_free(dest) {
            return false;
        }
        self.redraws.push(self.worker);
        self.worker = dest;
        self.redraws.push(dest);
        trace!(?direction, "move");
        true
    }

    /// Pushes the box ahead of the worker one cell further and steps the
    /// worker into the cell it left.
    pub fn push(&mut self, direction: Direction) -> bool {
        let box_pos = self.worker.step(direction);
        let new_box_pos = box_pos.step(direction);
        if !self.has_box(box_pos) || !self.is_free(new_box_pos) {
            return false;
        }
        self.grid[box_pos].remove_box();
        self.grid[new_box_pos].add_box();

        self.redraws.extend([self.worker, box_pos, new_box_pos]);
        self.worker = box_pos;
        trace!(?direction, "push");
        true
    }

    /// Inverse of [`GameEngine::push`]: the box behind the worker (relative
    /// to `direction`) follows the worker as it steps in `direction`.
    pub fn pull(&mut self, direction: Direction) -> bool {
        let box_pos = self.worker.step(direction.opposite());
        let new_box_pos = box_pos.step(direction);
        let dest = self.worker.step(direction);
        if !self.has_box(box_pos) || !self.is_free(dest) {
            return false;
        }
        self.grid[box_pos].remove_box();
        self.grid[new_box_pos].add_box();

        self.redraws.extend([box_pos, new_box_pos, dest]);
        self.worker = dest;
        trace!(?direction, "pull");
        true
    }

    pub fn is_solved(&self) -> bool {
        !self.grid.iter().any(|(_, c)| c.is_empty_shelf())
    }

    /// Sets the auto-walk mark on a cell. Returns false for positions outside
    /// the grid.
    pub fn set_marked(&mut self, pos: Position, marked: bool) -> bool {
        let Some(cell) = self.grid.get_mut(pos) else {
            return false;
        };
        if cell.marked != marked {
            cell.marked = marked;
            self.redraws.push(pos);
        }
        true
    }

    pub fn clear_marks(&mut self) {
        let cleared = self.grid.clear_marks();
        self.redraws.extend(cleared);
    }

    /// Drains the positions changed since the last call.
    pub fn take_redraws(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.redraws)
    }
}
