//! Warehouse level text: `.` empty, `#` wall, `s` shelf, `b` box, `w` worker.
//! `B` (box on shelf) and `W` (worker on shelf) are accepted as well so a
//! rendered board can be read back.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::core::{Cell, CellKind, GridModel, Position};
use crate::error::LevelError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub grid: GridModel,
    pub worker: Position,
}

pub fn parse_level(s: &str) -> Result<Level, LevelError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut worker: Option<Position> = None;

    for (i, line) in s.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        let mut row = Vec::with_capacity(line.len());
        for (j, ch) in line.chars().enumerate() {
            let cell = match ch {
                '.' => Cell::new(CellKind::Empty),
                '#' => Cell::new(CellKind::Wall),
                's' => Cell::new(CellKind::Shelf),
                'b' => Cell::with_box(CellKind::Empty),
                'B' => Cell::with_box(CellKind::Shelf),
                'w' | 'W' => {
                    if worker.is_some() {
                        return Err(LevelError::DuplicateWorker { row: i, col: j });
                    }
                    worker = Some(Position::new(i as i32, j as i32));
                    if ch == 'W' {
                        Cell::new(CellKind::Shelf)
                    } else {
                        Cell::new(CellKind::Empty)
                    }
                }
                _ => return Err(LevelError::InvalidChar { row: i, col: j, ch }),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    let worker = worker.ok_or(LevelError::MissingWorker)?;
    Ok(Level {
        grid: GridModel::new(rows),
        worker,
    })
}

/// Numbered level files `warehouse<N>.txt` in one directory.
#[derive(Clone, Debug)]
pub struct LevelSet {
    dir: PathBuf,
}

impl LevelSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LevelSet { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, number: u32) -> PathBuf {
        self.dir.join(format!("warehouse{number}.txt"))
    }

    pub fn exists(&self, number: u32) -> bool {
        self.path_for(number).is_file()
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load(&self, number: u32) -> Result<Level, LevelError> {
        let path = self.path_for(number);
        if !path.is_file() {
            return Err(LevelError::NoSuchLevel {
                number,
                dir: self.dir.clone(),
            });
        }
        let text = std::fs::read_to_string(&path).map_err(|source| LevelError::Io {
            path: path.clone(),
            source,
        })?;
        let level = parse_level(&text)?;
        info!(
            rows = level.grid.height(),
            boxes = level.grid.count_boxes(),
            shelves = level.grid.count_shelves(),
            "level loaded"
        );
        Ok(level)
    }
}
