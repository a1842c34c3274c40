//! The rectangular lattice of crossroads

use super::config::SimConfig;
use super::crossroad::Crossroad;
use super::error::{TrafficError, TrafficResult};
use super::types::{Direction, Position};

/// A width x height grid of crossroads, stored row by row
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    crossroads: Vec<Crossroad>,
}

impl Grid {
    /// Build a grid of default crossroads
    pub fn new(width: i32, height: i32) -> TrafficResult<Self> {
        Self::build(width, height, |position| Ok(Crossroad::new(position)))
    }

    /// Build a grid whose crossroads all use `config`
    pub fn with_config(width: i32, height: i32, config: &SimConfig) -> TrafficResult<Self> {
        config.validate()?;
        Self::build(width, height, |position| {
            Crossroad::with_config(position, config)
        })
    }

    fn build(
        width: i32,
        height: i32,
        mut make: impl FnMut(Position) -> TrafficResult<Crossroad>,
    ) -> TrafficResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TrafficError::InvalidDimensions { width, height });
        }

        let mut crossroads = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                crossroads.push(make(Position::new(x, y))?);
            }
        }

        Ok(Self {
            width,
            height,
            crossroads,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.crossroads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crossroads.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    fn index_of(&self, x: i32, y: i32) -> TrafficResult<usize> {
        if !self.contains(Position::new(x, y)) {
            return Err(TrafficError::InvalidCoordinate {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) as usize)
    }

    /// The crossroad at (x, y)
    pub fn at(&self, x: i32, y: i32) -> TrafficResult<&Crossroad> {
        let index = self.index_of(x, y)?;
        Ok(&self.crossroads[index])
    }

    pub fn at_mut(&mut self, x: i32, y: i32) -> TrafficResult<&mut Crossroad> {
        let index = self.index_of(x, y)?;
        Ok(&mut self.crossroads[index])
    }

    pub fn get(&self, position: Position) -> TrafficResult<&Crossroad> {
        self.at(position.x, position.y)
    }

    pub fn get_mut(&mut self, position: Position) -> TrafficResult<&mut Crossroad> {
        self.at_mut(position.x, position.y)
    }

    /// In-grid neighbours of `position` as (neighbour, direction) pairs,
    /// in North, East, South, West order
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Position, Direction)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            position
                .step(direction)
                .filter(|next| self.contains(*next))
                .map(|next| (next, direction))
        })
    }

    /// Every coordinate, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn crossroads(&self) -> impl Iterator<Item = &Crossroad> {
        self.crossroads.iter()
    }

    pub fn crossroads_mut(&mut self) -> impl Iterator<Item = &mut Crossroad> {
        self.crossroads.iter_mut()
    }
}
