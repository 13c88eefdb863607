use crate::core::{Cell, CellKind, Position};

/// Rows of cells. Rows keep the length they were loaded with, so the grid
/// may be jagged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    rows: Vec<Vec<Cell>>,
}

impl GridModel {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        GridModel { rows }
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Length of the longest row.
    pub fn width(&self) -> i32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn contains(&self, pos: Position) -> bool {
        if pos.row < 0 || pos.col < 0 {
            return false;
        }
        match self.rows.get(pos.row as usize) {
            Some(row) => (pos.col as usize) < row.len(),
            None => false,
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(&mut self[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, c)| (Position::new(i as i32, j as i32), c))
        })
    }

    pub fn count_boxes(&self) -> usize {
        self.iter().filter(|(_, c)| c.has_box).count()
    }

    pub fn count_shelves(&self) -> usize {
        self.iter().filter(|(_, c)| c.kind == CellKind::Shelf).count()
    }

    /// Clears every auto-walk mark, returning the positions that were marked.
    pub fn clear_marks(&mut self) -> Vec<Position> {
        let mut cleared = Vec::new();
        for (i, row) in self.rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if cell.marked {
                    cell.marked = false;
                    cleared.push(Position::new(i as i32, j as i32));
                }
            }
        }
        cleared
    }
}

impl std::ops::Index<Position> for GridModel {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.rows[index.row as usize][index.col as usize]
    }
}

impl std::ops::IndexMut<Position> for GridModel {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.rows[index.row as usize][index.col as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn jagged() -> GridModel {
        GridModel::new(vec![
            vec![Cell::new(CellKind::Wall); 4],
            vec![Cell::new(CellKind::Empty), Cell::with_box(CellKind::Shelf)],
        ])
    }

    #[test]
    fn get_respects_each_row_length() {
        let grid = jagged();
        assert!(grid.get(Position::new(0, 3)).is_some());
        assert!(grid.get(Position::new(1, 1)).is_some());
        assert!(grid.get(Position::new(1, 2)).is_none());
        assert!(grid.get(Position::new(2, 0)).is_none());
        assert!(grid.get(Position::new(-1, 0)).is_none());
        assert!(grid.get(Position::new(0, -1)).is_none());
        assert_eq!(4, grid.width());
        assert_eq!(2, grid.height());
    }

    #[test]
    fn counts_boxes_and_shelves() {
        let grid = jagged();
        assert_eq!(1, grid.count_boxes());
        assert_eq!(1, grid.count_shelves());
    }

    #[test]
    fn clear_marks_reports_cleared_cells() {
        let mut grid = jagged();
        grid[Position::new(1, 0)].marked = true;
        assert_eq!(vec![Position::new(1, 0)], grid.clear_marks());
        assert!(grid.clear_marks().is_empty());
    }
}
