//! A play session: one engine, its history, and whichever step sequence
//! (auto-walk or win flicker) is currently running.

use tracing::{debug, info, warn};

use crate::core::{
    next_walk_direction, plan_walk, walk_pending, ActionKind, ActionRecord, Direction, FlickerFrame,
    GameEngine, HistoryManager, MoveOutcome, Position, WinAnimation,
};
use crate::error::GameError;
use crate::level::Level;

#[derive(Clone, Debug)]
enum Activity {
    Idle,
    Walking,
    Celebrating(WinAnimation),
}

/// One discrete step produced by [`Game::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Walked(MoveOutcome),
    Flicker(FlickerFrame),
}

pub struct Game {
    engine: GameEngine,
    history: HistoryManager,
    level_number: u32,
    activity: Activity,
    solution_taken: bool,
}

impl Game {
    pub fn new(level_number: u32, level: Level, max_history_length: usize) -> Self {
        Game {
            engine: GameEngine::new(level.grid, level.worker),
            history: HistoryManager::new(max_history_length),
            level_number,
            activity: Activity::Idle,
            solution_taken: false,
        }
    }

    /// Replaces grid and worker and forgets all history.
    pub fn load_level(&mut self, level_number: u32, level: Level) {
        info!(level_number, "loading level");
        self.engine = GameEngine::new(level.grid, level.worker);
        self.history.clear_history();
        self.level_number = level_number;
        self.activity = Activity::Idle;
        self.solution_taken = false;
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn is_solved(&self) -> bool {
        self.engine.is_solved()
    }

    pub fn take_redraws(&mut self) -> Vec<Position> {
        self.engine.take_redraws()
    }

    /// Actions that led to the current state, oldest first, as far back as
    /// the history reaches.
    pub fn solution(&self) -> Vec<ActionRecord> {
        self.history.actions().copied().collect()
    }

    /// Hands out the solution once each time the warehouse becomes solved.
    pub fn take_solution(&mut self) -> Option<Vec<ActionRecord>> {
        if !self.engine.is_solved() {
            self.solution_taken = false;
            return None;
        }
        if self.solution_taken {
            return None;
        }
        self.solution_taken = true;
        let evicted = self.history.evicted();
        if evicted > 0 {
            warn!(
                evicted,
                capacity = self.history.capacity(),
                "solution is missing its earliest actions"
            );
        }
        Some(self.solution())
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.activity, Activity::Idle)
    }

    pub fn is_walking(&self) -> bool {
        matches!(self.activity, Activity::Walking)
    }

    /// Stops a running walk or animation and clears route marks.
    pub fn cancel(&mut self) {
        if self.is_busy() {
            debug!("cancelling running sequence");
        }
        self.engine.clear_marks();
        self.activity = Activity::Idle;
    }

    fn ensure_idle(&self, request: &str) -> Result<(), GameError> {
        if self.is_busy() {
            warn!(request, "rejected while busy");
            return Err(GameError::Busy);
        }
        Ok(())
    }

    /// Manual move. `Ok(None)` means the move was blocked.
    pub fn move_or_push(&mut self, direction: Direction) -> Result<Option<MoveOutcome>, GameError> {
        self.ensure_idle("move")?;
        Ok(self.apply(direction))
    }

    fn apply(&mut self, direction: Direction) -> Option<MoveOutcome> {
        let outcome = self.engine.move_or_push(direction)?;
        self.history.store_action(outcome.record);
        if outcome.solved {
            self.celebrate();
        }
        Some(outcome)
    }

    fn celebrate(&mut self) {
        self.engine.clear_marks();
        self.activity = Activity::Celebrating(WinAnimation::new(&self.engine));
    }

    /// Plans a route to `target` and starts walking it. Steps are taken by
    /// [`Game::tick`].
    pub fn move_worker(&mut self, target: Position) -> Result<Vec<Position>, GameError> {
        self.ensure_idle("route")?;
        let route = plan_walk(&mut self.engine, target)?;
        self.activity = Activity::Walking;
        Ok(route)
    }

    /// Advances the running sequence by one step. `None` once idle.
    pub fn tick(&mut self) -> Option<Tick> {
        if let Activity::Celebrating(animation) = &mut self.activity {
            if let Some(frame) = animation.next() {
                return Some(Tick::Flicker(frame));
            }
            self.activity = Activity::Idle;
            return None;
        }
        if !self.is_walking() {
            return None;
        }

        let Some(direction) = next_walk_direction(&mut self.engine) else {
            debug!("walk finished");
            self.activity = Activity::Idle;
            return None;
        };
        match self.apply(direction) {
            Some(outcome) => {
                if self.is_walking() && !walk_pending(&self.engine) {
                    debug!("walk finished");
                    self.activity = Activity::Idle;
                }
                Some(Tick::Walked(outcome))
            }
            None => {
                warn!(?direction, "walk blocked, abandoning route");
                self.cancel();
                None
            }
        }
    }

    /// Runs the current sequence to the end, returning every step.
    pub fn run_to_idle(&mut self) -> Vec<Tick> {
        std::iter::from_fn(|| self.tick()).collect()
    }

    pub fn undo(&mut self) -> Result<bool, GameError> {
        self.ensure_idle("undo")?;
        let undone = self.history.undo_action(&mut self.engine);
        if !self.engine.is_solved() {
            self.solution_taken = false;
        }
        Ok(undone)
    }

    /// Re-applies the last undone action. Redoing a push that completes the
    /// warehouse starts the win animation again.
    pub fn redo(&mut self) -> Result<bool, GameError> {
        self.ensure_idle("redo")?;
        let was_push = self
            .history
            .next_redo()
            .is_some_and(|r| r.kind == ActionKind::Push);
        let redone = self.history.redo_action(&mut self.engine);
        if redone && was_push && self.engine.is_solved() {
            info!("warehouse solved");
            self.celebrate();
        }
        Ok(redone)
    }
}
