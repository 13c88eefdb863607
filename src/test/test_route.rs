use crate::core::*;
use crate::error::RouteError;
use crate::test::test_util::{assert_symbols_match, engine_from, render_route};

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn open_corridor_route_has_one_position_per_cell() {
    let engine = engine_from("w.....");
    let route = find_route(&engine, p(0, 0), p(0, 5)).unwrap();
    assert_eq!(6, route.len());
    assert_eq!((0..6).map(|j| p(0, j)).collect::<Vec<_>>(), route);
}

#[test]
fn route_detours_around_wall() {
    let engine = engine_from(
        r#"
w#.
...
...
"#,
    );
    let route = find_route(&engine, p(0, 0), p(0, 2)).unwrap();
    assert_eq!(vec![p(0, 0), p(1, 0), p(1, 1), p(1, 2), p(0, 2)], route);
}

#[test]
fn route_prefers_earlier_directions_on_ties() {
    let engine = engine_from(
        r#"
w..
...
...
"#,
    );
    assert_eq!(vec![p(0, 0), p(0, 1), p(1, 1)], find_route(&engine, p(0, 0), p(1, 1)).unwrap());

    let route = find_route(&engine, p(0, 0), p(2, 2)).unwrap();
    assert_symbols_match(
        r#"
***
..*
..*
"#,
        &render_route(&engine, &route),
    );
}

#[test]
fn route_never_crosses_boxes() {
    let engine = engine_from(
        r#"
#######
#w.b..#
#.###.#
#.....#
#######
"#,
    );
    let route = find_route(&engine, p(1, 1), p(1, 5)).unwrap();
    assert_symbols_match(
        r#"
#######
#*.#.*#
#*###*#
#*****#
#######
"#,
        &render_route(&engine, &route),
    );
    assert_eq!(9, route.len());
}

#[test]
fn route_to_self_is_refused() {
    let engine = engine_from("w..");
    assert_eq!(
        Err(RouteError::NoRoute { start: p(0, 0), end: p(0, 0) }),
        find_route(&engine, p(0, 0), p(0, 0))
    );
}

#[test]
fn unreachable_cell_has_no_route() {
    let engine = engine_from("w.#..");
    assert!(matches!(
        find_route(&engine, p(0, 0), p(0, 4)),
        Err(RouteError::NoRoute { .. })
    ));
}

#[test]
fn walk_target_must_be_free() {
    let mut engine = engine_from("#wb.#\n#...#");
    for target in [p(0, 0), p(0, 2), p(5, 5), p(-1, 1)] {
        assert_eq!(
            Err(RouteError::InvalidDestination { position: target }),
            plan_walk(&mut engine, target)
        );
    }
    assert!(engine.grid().iter().all(|(_, c)| !c.marked));
}

#[test]
fn planned_walk_marks_route_after_worker() {
    let mut engine = engine_from(
        r#"
w#.
...
"#,
    );
    let route = plan_walk(&mut engine, p(0, 2)).unwrap();
    assert_eq!(4 + 1, route.len());

    let marked: Vec<_> = engine.grid().iter().filter(|(_, c)| c.marked).map(|(pos, _)| pos).collect();
    assert_eq!(vec![p(0, 2), p(1, 0), p(1, 1), p(1, 2)], marked);
    assert!(!engine.get_cell(p(0, 0)).unwrap().marked);
}

#[test]
fn walk_follows_marks_one_step_at_a_time() {
    let mut engine = engine_from(
        r#"
w#.
...
"#,
    );
    plan_walk(&mut engine, p(0, 2)).unwrap();

    use Direction::*;
    let mut steps = Vec::new();
    while let Some(direction) = next_walk_direction(&mut engine) {
        assert!(engine.move_or_push(direction).is_some());
        steps.push(direction);
    }

    assert_eq!(vec![Down, Right, Right, Up], steps);
    assert_eq!(p(0, 2), engine.worker_pos());
    assert!(engine.grid().iter().all(|(_, c)| !c.marked));
}

#[test]
fn walk_resumes_from_marks_after_interruption() {
    let mut engine = engine_from("w....");
    plan_walk(&mut engine, p(0, 4)).unwrap();

    assert_eq!(Some(Direction::Right), next_walk_direction(&mut engine));
    engine.move_or_push(Direction::Right);

    // nothing is kept outside the grid, so a fresh scan picks up where it left off
    let mut remaining = 0;
    while let Some(direction) = next_walk_direction(&mut engine) {
        engine.move_or_push(direction);
        remaining += 1;
    }
    assert_eq!(3, remaining);
    assert_eq!(p(0, 4), engine.worker_pos());
}
