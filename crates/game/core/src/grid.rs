//! Integer grid geometry: positions, directions, and bounds checks.
//!
//! The grid uses a y-up convention: [`Direction::Up`] and [`Direction::Right`]
//! move along the positive axes, [`Direction::Down`] and [`Direction::Left`]
//! along the negative ones.
use std::fmt;

use crate::error::{ErrorCategory, GameError};

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one cell away in `direction`.
    pub fn translated(self, direction: Direction) -> Self {
        self.translated_by(direction, 1)
    }

    /// Returns the position `magnitude` cells away in `direction`.
    ///
    /// No bounds checking is performed. Coordinates wrap at the `i32` range.
    pub fn translated_by(self, direction: Direction, magnitude: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.wrapping_add(dx.wrapping_mul(magnitude)),
            y: self.y.wrapping_add(dy.wrapping_mul(magnitude)),
        }
    }

    /// Grid (Manhattan) distance: `|x1 - x2| + |y1 - y2|`.
    pub fn distance_grid(self, other: Position) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// Straight-line distance between the two cell centers.
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// True iff the two positions share an edge.
    ///
    /// Equivalent to a straight-line distance of exactly 1: one axis differs
    /// by one and the other is equal. Diagonal neighbours are not adjacent and
    /// a position is not adjacent to itself.
    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.distance_grid(other) == 1
    }

    /// Checks `min_x <= x < max_x` and `min_y <= y < max_y`.
    ///
    /// Fails if either pair of bounds is inverted.
    pub fn in_bounds(self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<bool, GridError> {
        if min_x > max_x || min_y > max_y {
            return Err(GridError::InvertedBounds {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }

        Ok((min_x..max_x).contains(&self.x) && (min_y..max_y).contains(&self.y))
    }

    /// The four orthogonal neighbours of this position.
    pub fn adjacent_points(self) -> [Position; 4] {
        Direction::ALL.map(|direction| self.translated(direction))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal direction on the grid.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset along the axis this direction affects.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Width and height of a rectangular grid anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Number of cells in the grid, or `None` if it does not fit in `usize`.
    pub fn area(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

/// Errors raised by grid geometry helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("inverted bounds: x in [{min_x}, {max_x}), y in [{min_y}, {max_y})")]
    InvertedBounds {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },
}

impl GameError for GridError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::InvertedBounds { .. } => "GRID_INVERTED_BOUNDS",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn distance_grid_sums_axis_offsets() {
        let origin = Position::ORIGIN;
        assert_eq!(origin.distance_grid(Position::new(1, 1)), 2);
        assert_eq!(origin.distance_grid(Position::new(2, 7)), 9);
        assert_eq!(Position::new(-3, 4).distance_grid(Position::new(3, -4)), 14);
    }

    #[test]
    fn euclidean_distance_of_diagonal_is_root_two() {
        let d = Position::ORIGIN.distance(Position::new(1, 1));
        assert!((d - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn adjacency_excludes_diagonals_and_self() {
        let origin = Position::ORIGIN;
        assert!(origin.is_adjacent_to(Position::new(0, 1)));
        assert!(origin.is_adjacent_to(Position::new(-1, 0)));
        assert!(!origin.is_adjacent_to(Position::new(1, 1)));
        assert!(!origin.is_adjacent_to(origin));
        assert!(!origin.is_adjacent_to(Position::new(0, 2)));
    }

    #[test]
    fn translate_follows_y_up_convention() {
        let origin = Position::ORIGIN;
        assert_eq!(origin.translated_by(Direction::Up, 2), Position::new(0, 2));
        assert_eq!(origin.translated_by(Direction::Down, 3), Position::new(0, -3));
        assert_eq!(origin.translated_by(Direction::Left, 1), Position::new(-1, 0));
        assert_eq!(origin.translated_by(Direction::Right, -5), Position::new(-5, 0));

        for direction in Direction::ALL {
            assert_eq!(
                origin.translated(direction),
                origin.translated_by(direction, 1)
            );
        }
    }

    #[test]
    fn in_bounds_is_half_open() {
        let (min, max) = (0, 10);
        for inside in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            let p = Position::from(inside);
            assert_eq!(p.in_bounds(min, min, max, max), Ok(true), "{p}");
        }
        for outside in [(-1, -1), (-1, 0), (0, -1), (10, 10), (10, 9), (9, 10)] {
            let p = Position::from(outside);
            assert_eq!(p.in_bounds(min, min, max, max), Ok(false), "{p}");
        }
    }

    #[test]
    fn in_bounds_rejects_inverted_bounds() {
        let origin = Position::ORIGIN;
        assert!(origin.in_bounds(-1, -1, 1, 1).is_ok());
        assert!(origin.in_bounds(1, -1, -1, 1).is_err());
        assert!(origin.in_bounds(-1, 1, 1, -1).is_err());

        let err = origin.in_bounds(1, 1, -1, -1).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);
        assert_eq!(err.error_code(), "GRID_INVERTED_BOUNDS");
    }

    #[test]
    fn adjacent_points_are_the_four_neighbours() {
        let expected: HashSet<_> = [(1, 0), (0, 1), (-1, 0), (0, -1)]
            .into_iter()
            .map(Position::from)
            .collect();
        let actual: HashSet<_> = Position::ORIGIN.adjacent_points().into_iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(Direction::Right.to_string(), "right");
    }

    #[test]
    fn dimensions_contain_only_cells_inside() {
        let dims = MapDimensions::new(3, 2);
        assert!(dims.contains(Position::new(2, 1)));
        assert!(!dims.contains(Position::new(3, 1)));
        assert!(!dims.contains(Position::new(0, 2)));
        assert!(!dims.contains(Position::new(-1, 0)));
        assert_eq!(dims.area(), Some(6));
    }
}
