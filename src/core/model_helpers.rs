use crate::core::{ActionKind, ActionRecord, Cell, CellKind, Direction, Position};

impl Cell {
    pub fn new(kind: CellKind) -> Self {
        Cell { kind, has_box: false, marked: false }
    }

    pub fn with_box(kind: CellKind) -> Self {
        Cell { kind, has_box: true, marked: false }
    }

    pub fn is_free(&self) -> bool {
        self.kind != CellKind::Wall && !self.has_box
    }

    pub fn is_empty_shelf(&self) -> bool {
        self.kind == CellKind::Shelf && !self.has_box
    }

    pub fn add_box(&mut self) {
        self.has_box = true;
    }

    pub fn remove_box(&mut self) {
        self.has_box = false;
    }
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn step(self, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position { row: self.row + dr, col: self.col + dc }
    }
}

impl Direction {
    /// Neighbour scan order used by the route search and the auto-walk.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// (row, col) offset of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

impl ActionRecord {
    pub fn new(kind: ActionKind, direction: Direction) -> Self {
        ActionRecord { kind, direction }
    }

    pub fn is_move(&self) -> bool {
        self.kind == ActionKind::Move
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn step_then_step_back_returns_home() {
        let origin = Position::new(3, 4);
        for d in Direction::ALL {
            assert_eq!(origin, origin.step(d).step(d.opposite()));
        }
        assert_eq!(Position::new(2, 4), origin.step(Direction::Up));
        assert_eq!(Position::new(3, 5), origin.step(Direction::Right));
    }

    #[test]
    fn free_and_empty_shelf_predicates() {
        assert!(Cell::new(CellKind::Empty).is_free());
        assert!(Cell::new(CellKind::Shelf).is_free());
        assert!(!Cell::new(CellKind::Wall).is_free());
        assert!(!Cell::with_box(CellKind::Empty).is_free());

        assert!(Cell::new(CellKind::Shelf).is_empty_shelf());
        assert!(!Cell::with_box(CellKind::Shelf).is_empty_shelf());
        assert!(!Cell::new(CellKind::Empty).is_empty_shelf());
    }
}
