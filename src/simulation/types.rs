//! Core types for the traffic simulation
//!
//! Coordinates, directions and light phases shared by every component.

use std::fmt;
use std::ops::{Index, IndexMut};

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 .0)
    }
}

/// A crossroad coordinate on the grid
///
/// (0, 0) is the top-left corner, x grows east and y grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate one step towards `direction`, or `None` if
    /// it does not fit in an i32. Does not check grid bounds.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Number of grid hops between two positions ignoring closures
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Direction of a single grid hop from `self` to `other`, if they are adjacent
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(*other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Cardinal directions on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Decreasing y
    North,
    /// Increasing x
    East,
    /// Increasing y
    South,
    /// Decreasing x
    West,
}

impl Direction {
    /// Every direction, in neighbour enumeration order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// (dx, dy) of a single step in this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// One value per direction, always fully populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerDirection<T>([T; 4]);

impl<T> PerDirection<T> {
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self(Direction::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Direction, &mut T)> {
        Direction::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T> Index<Direction> for PerDirection<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.0[direction.index()]
    }
}

impl<T> IndexMut<Direction> for PerDirection<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.0[direction.index()]
    }
}

/// Traffic light phases
///
/// Lights cycle Green -> Yellow -> Red -> Green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightPhase {
    /// Stop, nothing is released
    Red,
    /// Caution, half the green flow (at least one vehicle)
    Yellow,
    /// Full flow
    Green,
}

impl LightPhase {
    pub const ALL: [LightPhase; 3] = [LightPhase::Red, LightPhase::Yellow, LightPhase::Green];

    /// The phase entered when this one runs out
    pub fn next(self) -> LightPhase {
        match self {
            LightPhase::Green => LightPhase::Yellow,
            LightPhase::Yellow => LightPhase::Red,
            LightPhase::Red => LightPhase::Green,
        }
    }

    fn index(self) -> usize {
        match self {
            LightPhase::Red => 0,
            LightPhase::Yellow => 1,
            LightPhase::Green => 2,
        }
    }
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightPhase::Red => "Red",
            LightPhase::Yellow => "Yellow",
            LightPhase::Green => "Green",
        };
        f.write_str(name)
    }
}

/// Minutes spent in each light phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations([u32; 3]);

impl PhaseDurations {
    pub fn new(green: u32, yellow: u32, red: u32) -> Self {
        let mut durations = [0; 3];
        durations[LightPhase::Green.index()] = green;
        durations[LightPhase::Yellow.index()] = yellow;
        durations[LightPhase::Red.index()] = red;
        Self(durations)
    }

    pub fn get(&self, phase: LightPhase) -> u32 {
        self.0[phase.index()]
    }

    pub fn set(&mut self, phase: LightPhase, minutes: u32) {
        self.0[phase.index()] = minutes;
    }
}
