//! Immutable, adjacency-checked routes across the grid.
use std::fmt;
use std::slice;

use crate::error::{ErrorCategory, GameError};
use crate::grid::Position;

/// Ordered sequence of grid positions where each consecutive pair is adjacent.
///
/// Paths are values: every extending operation returns a new `Path` and
/// leaves the receiver untouched. Equality and hashing are structural over the
/// ordered positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Position>", into = "Vec<Position>"))]
pub struct Path {
    points: Vec<Position>,
}

impl Path {
    /// The zero-length path.
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// The one-point path starting and ending at `point`.
    pub fn singleton(point: Position) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Builds a path from `points`, checking every consecutive pair.
    pub fn new<I>(points: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = Position>,
    {
        let points: Vec<Position> = points.into_iter().collect();

        if let Some(index) = points
            .windows(2)
            .position(|pair| !pair[0].is_adjacent_to(pair[1]))
        {
            return Err(PathError::NotAdjacent {
                index: index + 1,
                from: points[index],
                to: points[index + 1],
            });
        }

        Ok(Self { points })
    }

    /// Returns this path extended by `point`.
    ///
    /// - Empty path: `point` becomes the sole element.
    /// - `point` already on the path: the result ends at its first occurrence
    ///   and anything after it is dropped.
    /// - Otherwise `point` must be adjacent to the current end.
    pub fn concat(&self, point: Position) -> Result<Path, PathError> {
        if let Some(index) = self.points.iter().position(|p| *p == point) {
            if index + 1 == self.points.len() {
                tracing::warn!(%point, "path concatenated with its own end point");
            }
            return Ok(Self {
                points: self.points[..=index].to_vec(),
            });
        }

        match self.points.last() {
            None => Ok(Self::singleton(point)),
            Some(end) if end.is_adjacent_to(point) => {
                let mut points = Vec::with_capacity(self.points.len() + 1);
                points.extend_from_slice(&self.points);
                points.push(point);
                Ok(Self { points })
            }
            Some(end) => Err(PathError::Detached { end: *end, point }),
        }
    }

    pub fn get(&self, index: usize) -> Result<Position, PathError> {
        self.points
            .get(index)
            .copied()
            .ok_or(PathError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// First position of the path.
    pub fn start(&self) -> Result<Position, PathError> {
        self.points.first().copied().ok_or(PathError::Empty)
    }

    /// Last position of the path.
    pub fn end(&self) -> Result<Position, PathError> {
        self.points.last().copied().ok_or(PathError::Empty)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Position) -> bool {
        self.points.contains(&point)
    }

    pub fn iter(&self) -> slice::Iter<'_, Position> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.points
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.points.clone()
    }
}

impl TryFrom<Vec<Position>> for Path {
    type Error = PathError;

    fn try_from(points: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Position> for Path {
    fn from(point: Position) -> Self {
        Self::singleton(point)
    }
}

impl From<Path> for Vec<Position> {
    fn from(path: Path) -> Self {
        path.points
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

/// Errors raised when building or reading a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path points {from} and {to} at index {index} are not adjacent")]
    NotAdjacent {
        index: usize,
        from: Position,
        to: Position,
    },

    #[error("point {point} is neither on the path nor adjacent to its end {end}")]
    Detached { end: Position, point: Position },

    #[error("path index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("path is empty")]
    Empty,
}

impl GameError for PathError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            PathError::NotAdjacent { .. } => "PATH_NOT_ADJACENT",
            PathError::Detached { .. } => "PATH_DETACHED",
            PathError::IndexOutOfRange { .. } => "PATH_INDEX_OUT_OF_RANGE",
            PathError::Empty => "PATH_EMPTY",
        }
    }
}
