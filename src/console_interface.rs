use crate::core::{Cell, CellKind, Direction, GameEngine, Position};
use crate::models::{GameRenderState, UserAction};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

pub type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> io::Result<ConsoleTerminal> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

pub fn cleanup_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    Ok(())
}

/// Where the top-left cell of the board was drawn, in terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardOrigin {
    pub x: u16,
    pub y: u16,
}

impl BoardOrigin {
    /// Maps a terminal coordinate back to a grid position.
    pub fn to_position(&self, column: u16, row: u16) -> Option<Position> {
        if column < self.x || row < self.y {
            return None;
        }
        Some(Position::new((row - self.y) as i32, (column - self.x) as i32))
    }
}

pub fn render_game(
    terminal: &mut ConsoleTerminal,
    engine: &GameEngine,
    state: &GameRenderState,
) -> io::Result<BoardOrigin> {
    let mut origin = BoardOrigin::default();
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        // inside the border
        origin = BoardOrigin {
            x: chunks[0].x + 1,
            y: chunks[0].y + 1,
        };
        let title = format!("Warehouse {}", state.level_number);
        let game_paragraph = Paragraph::new(render_lines(engine, state))
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White));
        f.render_widget(game_paragraph, chunks[0]);

        let instructions = if state.won {
            "Solved! n: next level, R: restart, q: quit"
        } else {
            "Arrows/WASD/IJKL move, click to walk, u undo, r redo, R restart, n next, q quit"
        };
        let instructions = match &state.message {
            Some(msg) => format!("{} | {}", msg, instructions),
            None => instructions.to_string(),
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(instruction_paragraph, chunks[1]);
    })?;
    Ok(origin)
}

fn worker_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Right => '>',
        Direction::Down => 'v',
        Direction::Left => '<',
    }
}

fn cell_glyph(cell: &Cell, show_box: bool) -> char {
    match (cell.kind, show_box) {
        (CellKind::Wall, _) => '#',
        (CellKind::Empty, false) => ' ',
        (CellKind::Empty, true) => 'b',
        (CellKind::Shelf, false) => 's',
        (CellKind::Shelf, true) => 'B',
    }
}

fn render_lines(engine: &GameEngine, state: &GameRenderState) -> Vec<Line<'static>> {
    let inverted = state.flicker.as_ref().filter(|f| f.inverted);
    engine
        .grid()
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let spans = row
                .iter()
                .enumerate()
                .map(|(j, cell)| {
                    let pos = Position::new(i as i32, j as i32);
                    if pos == engine.worker_pos() {
                        let glyph = worker_glyph(engine.worker_facing());
                        return Span::styled(glyph.to_string(), Style::default().fg(Color::Yellow));
                    }
                    let toggled = inverted.is_some_and(|f| f.cells.contains(&pos));
                    let glyph = cell_glyph(cell, cell.has_box != toggled);
                    let mut style = match cell.kind {
                        CellKind::Shelf => Style::default().fg(Color::Green),
                        _ => Style::default(),
                    };
                    if cell.marked {
                        style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                    }
                    Span::styled(glyph.to_string(), style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

/// Plain text board in level notation, worker drawn as `w` (`W` on a shelf).
pub fn render_game_to_string(engine: &GameEngine) -> String {
    let mut result = String::new();
    for (i, row) in engine.grid().rows().iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let has_worker = Position::new(i as i32, j as i32) == engine.worker_pos();
            let ch = match cell.kind {
                CellKind::Wall => '#',
                CellKind::Empty => {
                    if has_worker {
                        'w'
                    } else if cell.has_box {
                        'b'
                    } else {
                        '.'
                    }
                }
                CellKind::Shelf => {
                    if has_worker {
                        'W'
                    } else if cell.has_box {
                        'B'
                    } else {
                        's'
                    }
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Click { column: u16, row: u16 },
    Quit,
    Timeout,
    Unknown,
}

pub fn map_key(code: KeyCode) -> ConsoleInput {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('i') | KeyCode::Up => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Up))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('k') | KeyCode::Down => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Down))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('j') | KeyCode::Left => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Left))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Right => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Right))
        }
        KeyCode::Char('u') | KeyCode::Char('U') => ConsoleInput::UserAction(UserAction::Undo),
        KeyCode::Char('r') => ConsoleInput::UserAction(UserAction::Redo),
        KeyCode::Char('R') | KeyCode::Backspace => ConsoleInput::UserAction(UserAction::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => ConsoleInput::UserAction(UserAction::NextLevel),
        _ => ConsoleInput::Unknown,
    }
}

/// Waits up to `timeout` for one input event.
pub fn handle_input(timeout: Duration) -> io::Result<ConsoleInput> {
    if !event::poll(timeout)? {
        return Ok(ConsoleInput::Timeout);
    }
    Ok(match event::read()? {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => map_key(code),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => ConsoleInput::Click { column, row },
        _ => ConsoleInput::Unknown,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn click_maps_to_grid_position() {
        let origin = BoardOrigin { x: 1, y: 1 };
        assert_eq!(Some(Position::new(2, 4)), origin.to_position(5, 3));
        assert_eq!(None, origin.to_position(0, 3));
    }

    #[test]
    fn key_bindings_cover_all_directions() {
        for (key, dir) in [
            (KeyCode::Char('i'), Direction::Up),
            (KeyCode::Char('l'), Direction::Right),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
        ] {
            assert!(matches!(
                map_key(key),
                ConsoleInput::UserAction(UserAction::Move(d)) if d == dir
            ));
        }
        assert!(matches!(map_key(KeyCode::Char('u')), ConsoleInput::UserAction(UserAction::Undo)));
        assert!(matches!(map_key(KeyCode::Char('r')), ConsoleInput::UserAction(UserAction::Redo)));
        assert!(matches!(map_key(KeyCode::Char('R')), ConsoleInput::UserAction(UserAction::Restart)));
    }
}
