use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument};

use crate::core::{Direction, GameEngine, Position};
use crate::error::RouteError;

/// Shortest chain of free cells from `start` to `end`, both included.
///
/// Breadth-first over free cells, expanding neighbours up, right, down, left.
/// The first discovery of a cell fixes its parent, so among equally short
/// routes the one whose moves come first in that order wins. A route from a
/// cell to itself is refused.
#[instrument(skip(engine))]
pub fn find_route(engine: &GameEngine, start: Position, end: Position) -> Result<Vec<Position>, RouteError> {
    let no_route = RouteError::NoRoute { start, end };
    if start == end {
        return Err(no_route);
    }

    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut frontier = VecDeque::from([start]);

    while let Some(current) = frontier.pop_front() {
        for direction in Direction::ALL {
            let next = current.step(direction);
            if next == start || parents.contains_key(&next) {
                continue;
            }
            if !engine.get_cell(next).is_some_and(|c| c.is_free()) {
                continue;
            }
            parents.insert(next, current);
            if next == end {
                let route = backtrack(&parents, start, end);
                debug!(steps = route.len() - 1, "route found");
                return Ok(route);
            }
            frontier.push_back(next);
        }
    }

    Err(no_route)
}

fn backtrack(parents: &HashMap<Position, Position>, start: Position, end: Position) -> Vec<Position> {
    let mut route = vec![end];
    let mut current = end;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                route.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    route.reverse();
    route
}

/// Validates `target`, finds a route from the worker to it and marks every
/// cell of the route after the worker's own for the auto-walk.
pub fn plan_walk(engine: &mut GameEngine, target: Position) -> Result<Vec<Position>, RouteError> {
    if !engine.get_cell(target).is_some_and(|c| c.is_free()) {
        return Err(RouteError::InvalidDestination { position: target });
    }
    let route = find_route(engine, engine.worker_pos(), target)?;
    for &pos in route.iter().skip(1) {
        engine.set_marked(pos, true);
    }
    Ok(route)
}

/// Next step of an auto-walk: the first marked neighbour of the worker,
/// scanning up, right, down, left. The mark is cleared before returning.
/// `None` ends the walk.
pub fn next_walk_direction(engine: &mut GameEngine) -> Option<Direction> {
    let worker = engine.worker_pos();
    let direction = marked_neighbour(engine)?;
    engine.set_marked(worker.step(direction), false);
    Some(direction)
}

/// True while a marked cell still borders the worker.
pub fn walk_pending(engine: &GameEngine) -> bool {
    marked_neighbour(engine).is_some()
}

fn marked_neighbour(engine: &GameEngine) -> Option<Direction> {
    let worker = engine.worker_pos();
    Direction::ALL
        .into_iter()
        .find(|&d| engine.get_cell(worker.step(d)).is_some_and(|c| c.marked))
}
