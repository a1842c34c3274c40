//! Grid construction, lookup and crossroad defaults

use manhattan_traffic::simulation::{
    Crossroad, Direction, Grid, LightPhase, Position, SimConfig, TrafficError,
    DEFAULT_STREET_CAPACITY,
};

#[test]
fn test_corner_has_two_neighbors() {
    let grid = Grid::new(3, 3).expect("valid grid");
    let neighbors: Vec<_> = grid.neighbors(Position::new(0, 0)).collect();
    assert_eq!(
        neighbors,
        vec![
            (Position::new(1, 0), Direction::East),
            (Position::new(0, 1), Direction::South),
        ]
    );
}

#[test]
fn test_center_has_four_neighbors_in_order() {
    let grid = Grid::new(3, 3).expect("valid grid");
    let neighbors: Vec<_> = grid.neighbors(Position::new(1, 1)).collect();
    assert_eq!(
        neighbors,
        vec![
            (Position::new(1, 0), Direction::North),
            (Position::new(2, 1), Direction::East),
            (Position::new(1, 2), Direction::South),
            (Position::new(0, 1), Direction::West),
        ]
    );
}

#[test]
fn test_single_crossroad_has_no_neighbors() {
    let grid = Grid::new(1, 1).expect("valid grid");
    assert_eq!(grid.neighbors(Position::new(0, 0)).count(), 0);
}

#[test]
fn test_non_positive_dimensions_are_rejected() {
    for (width, height) in [(0, 3), (3, 0), (-1, 2), (2, -5)] {
        assert_eq!(
            Grid::new(width, height).err(),
            Some(TrafficError::InvalidDimensions { width, height })
        );
    }
}

#[test]
fn test_lookup_out_of_bounds_fails() {
    let grid = Grid::new(4, 2).expect("valid grid");
    assert_eq!(grid.at(3, 1).expect("in bounds").position(), Position::new(3, 1));

    for (x, y) in [(4, 0), (0, 2), (-1, 0), (0, -1)] {
        assert_eq!(
            grid.at(x, y).err(),
            Some(TrafficError::InvalidCoordinate {
                x,
                y,
                width: 4,
                height: 2
            })
        );
    }
}

#[test]
fn test_positions_cover_grid_row_by_row() {
    let grid = Grid::new(2, 2).expect("valid grid");
    let positions: Vec<_> = grid.positions().collect();
    assert_eq!(
        positions,
        vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]
    );
    assert_eq!(grid.len(), 4);
    for position in positions {
        assert_eq!(grid.get(position).expect("in bounds").position(), position);
    }
}

#[test]
fn test_crossroad_defaults() {
    let crossroad = Crossroad::new(Position::new(2, 1));
    assert_eq!(crossroad.to_string(), "Cross(2,1)");

    for direction in Direction::ALL {
        let light = crossroad.light(direction);
        assert_eq!(light.phase(), LightPhase::Green);
        assert_eq!(light.remaining(), 3);

        let street = crossroad.street_out(direction);
        assert_eq!(street.travel_time(), 1);
        assert_eq!(street.capacity(), DEFAULT_STREET_CAPACITY);
        assert!(!street.is_closed());
    }
    assert_eq!(crossroad.lights().count(), 4);
    assert_eq!(crossroad.streets().count(), 4);
}

#[test]
fn test_crossroad_tick_advances_every_light() {
    let mut crossroad = Crossroad::new(Position::new(0, 0));
    for _ in 0..3 {
        crossroad.tick();
    }
    for (_, light) in crossroad.lights() {
        assert_eq!(light.phase(), LightPhase::Yellow);
    }
}

#[test]
fn test_crossroad_tick_leaves_streets_alone() {
    let mut fleet = manhattan_traffic::simulation::Fleet::new();
    let id = fleet.spawn("car", Position::new(1, 0), false);

    let mut crossroad = Crossroad::new(Position::new(0, 0));
    assert!(crossroad.street_out_mut(Direction::East).try_enter(id));
    crossroad.tick();
    crossroad.tick();
    assert_eq!(crossroad.street_out(Direction::East).load(), 1);
    assert_eq!(fleet.get(id).expect("vehicle exists").travel_minutes(), 0);
}

#[test]
fn test_grid_with_config_applies_to_every_crossroad() {
    let config = SimConfig {
        initial_phase: LightPhase::Red,
        travel_time: 4,
        street_capacity: 7,
        ..SimConfig::default()
    };
    let grid = Grid::with_config(2, 3, &config).expect("valid config");

    for crossroad in grid.crossroads() {
        for (_, light) in crossroad.lights() {
            assert_eq!(light.phase(), LightPhase::Red);
            assert_eq!(light.remaining(), 5);
        }
        for (_, street) in crossroad.streets() {
            assert_eq!(street.travel_time(), 4);
            assert_eq!(street.capacity(), 7);
        }
    }
}

#[test]
fn test_position_helpers() {
    let origin = Position::new(1, 1);
    assert_eq!(origin.step(Direction::North), Some(Position::new(1, 0)));
    assert_eq!(origin.step(Direction::West), Some(Position::new(0, 1)));
    assert_eq!(origin.direction_to(&Position::new(2, 1)), Some(Direction::East));
    assert_eq!(origin.direction_to(&Position::new(2, 2)), None);
    assert_eq!(origin.manhattan_distance(&Position::new(4, -1)), 5);
    assert_eq!(Direction::South.opposite(), Direction::North);
    assert_eq!(origin.to_string(), "(1,1)");
}

#[test]
fn test_step_past_coordinate_limits_is_none() {
    assert_eq!(Position::new(i32::MAX, 0).step(Direction::East), None);
    assert_eq!(Position::new(i32::MIN, 0).step(Direction::West), None);
    assert_eq!(Position::new(0, i32::MIN).step(Direction::North), None);
    assert_eq!(
        Position::new(i32::MAX, 0).step(Direction::West),
        Some(Position::new(i32::MAX - 1, 0))
    );
}

#[test]
fn test_neighbors_at_coordinate_limits_do_not_overflow() {
    let grid = Grid::new(3, 3).expect("valid grid");
    assert_eq!(grid.neighbors(Position::new(i32::MAX, 0)).count(), 0);
    assert_eq!(grid.neighbors(Position::new(0, i32::MAX)).count(), 0);
    assert_eq!(grid.neighbors(Position::new(i32::MIN, i32::MIN)).count(), 0);
}
