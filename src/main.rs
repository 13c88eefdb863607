// Terminal Sokoban.
// Controls: arrows/WASD/IJKL move, left click walks to a cell, u/r undo/redo,
// R restart, n next level, q quit.
// Level files: '#' wall, '.' floor, 's' shelf, 'b' box, 'w' worker.

use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sokoban::config::{Args, Settings};
use sokoban::console_interface::{
    cleanup_terminal, handle_input, render_game, setup_terminal, ConsoleInput, ConsoleTerminal,
};
use sokoban::core::ActionRecord;
use sokoban::models::{GameRenderState, UserAction};
use sokoban::pacing::StepPacer;
use sokoban::{Game, GameError, LevelError, LevelSet, RouteError, Tick};

const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let settings = Settings::resolve(Args::parse())?;
    init_logging(&settings.log_file)?;

    let levels = LevelSet::new(&settings.levels_dir);
    let level = levels
        .load(settings.level)
        .with_context(|| format!("loading level {}", settings.level))?;
    let mut game = Game::new(settings.level, level, settings.history_size);

    let mut terminal = setup_terminal().context("setting up terminal")?;
    let result = run_interactive(&mut game, &levels, &settings, &mut terminal);
    cleanup_terminal().context("restoring terminal")?;
    result
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_interactive(
    game: &mut Game,
    levels: &LevelSet,
    settings: &Settings,
    terminal: &mut ConsoleTerminal,
) -> anyhow::Result<()> {
    let step_delay = Duration::from_millis(settings.step_delay_ms);
    let flicker_delay = Duration::from_millis(settings.flicker_delay_ms);

    let mut message = Some(level_banner(game.level_number()));
    let mut flicker = None;
    let mut pacer = StepPacer::new();

    loop {
        // the whole frame is redrawn every pass
        game.take_redraws();
        let state = GameRenderState {
            level_number: game.level_number(),
            won: game.is_solved(),
            message: message.clone(),
            flicker: flicker.clone(),
        };
        let origin = render_game(terminal, game.engine(), &state)?;

        let pace = if game.is_walking() {
            Some(step_delay)
        } else if game.is_busy() {
            Some(flicker_delay)
        } else {
            None
        };
        let timeout = pacer.poll_timeout(Instant::now(), pace).unwrap_or(IDLE_POLL);

        match handle_input(timeout)? {
            ConsoleInput::Quit => break,
            ConsoleInput::Unknown | ConsoleInput::Timeout => {}
            ConsoleInput::Click { column, row } => {
                game.cancel();
                pacer.reset();
                flicker = None;
                message = Some(match origin.to_position(column, row) {
                    None => "Invalid destination!".to_string(),
                    Some(target) => match game.move_worker(target) {
                        Ok(_) => "Route found!".to_string(),
                        Err(GameError::Route(RouteError::InvalidDestination { .. })) => {
                            "Invalid destination!".to_string()
                        }
                        Err(GameError::Route(RouteError::NoRoute { .. })) => {
                            "No route to destination!".to_string()
                        }
                        Err(err) => err.to_string(),
                    },
                });
            }
            ConsoleInput::UserAction(action) => {
                game.cancel();
                pacer.reset();
                flicker = None;
                message = apply_action(game, levels, action);
            }
        }

        // any event kind may arrive at or past the deadline
        if pacer.take_due(Instant::now()) {
            match game.tick() {
                Some(Tick::Flicker(frame)) => flicker = Some(frame),
                Some(Tick::Walked(_)) => {}
                None => flicker = None,
            }
        }

        if let Some(solution) = game.take_solution() {
            if let Some(dir) = &settings.export_dir {
                match export_solution(dir, game.level_number(), &solution) {
                    Ok(path) => info!(path = %path.display(), "solution exported"),
                    Err(err) => {
                        warn!(error = %err, "solution export failed");
                        message = Some(format!("Export failed: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}

fn level_banner(level_number: u32) -> String {
    format!("Level {level_number}: push the boxes onto the shelves")
}

/// Returns the status message to show.
fn apply_action(game: &mut Game, levels: &LevelSet, action: UserAction) -> Option<String> {
    match action {
        UserAction::Move(direction) => match game.move_or_push(direction) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        },
        UserAction::Undo => match game.undo() {
            Ok(true) => Some("Action undone.".to_string()),
            Ok(false) => Some("Nothing to undo!".to_string()),
            Err(err) => Some(err.to_string()),
        },
        UserAction::Redo => match game.redo() {
            Ok(true) => Some("Action redone.".to_string()),
            Ok(false) => Some("Nothing to redo!".to_string()),
            Err(err) => Some(err.to_string()),
        },
        UserAction::Restart => {
            let current = game.level_number();
            load_into(game, levels, current)
        }
        UserAction::NextLevel => {
            let next = game.level_number() + 1;
            load_into(game, levels, next)
        }
    }
}

fn load_into(game: &mut Game, levels: &LevelSet, number: u32) -> Option<String> {
    match levels.load(number) {
        Ok(level) => {
            game.load_level(number, level);
            Some(level_banner(number))
        }
        Err(LevelError::NoSuchLevel { .. }) => Some("Run out of levels!".to_string()),
        Err(err) => {
            warn!(error = %err, number, "level failed to load");
            Some(err.to_string())
        }
    }
}

fn export_solution(
    dir: &Path,
    level_number: u32,
    actions: &[ActionRecord],
) -> anyhow::Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("level{level_number}_solution.json"));
    let json = serde_json::to_string_pretty(actions)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
