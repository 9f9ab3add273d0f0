use crate::error::{ErrorCategory, GameError};
use crate::grid::{MapDimensions, Position};
use crate::unit::{UnitError, UnitId};

/// Errors raised by [`Map`](super::Map) queries and mutations.
///
/// A failed mutation leaves the map, the unit and every observer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error(
        "map dimensions must be positive and cover at most {} cells, got {width}x{height}",
        super::Map::MAX_AREA
    )]
    InvalidDimensions { width: u32, height: u32 },

    #[error("position {position} is outside the {}x{} map", dimensions.width, dimensions.height)]
    OutOfBounds {
        position: Position,
        dimensions: MapDimensions,
    },

    #[error("position {position} is already occupied by {occupant}")]
    Occupied { position: Position, occupant: UnitId },

    #[error("{unit} is already placed on this map at {position}")]
    DuplicatePlacement { unit: UnitId, position: Position },

    #[error("{unit} is not on this map")]
    UnitNotFound { unit: UnitId },

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl GameError for MapError {
    fn category(&self) -> ErrorCategory {
        match self {
            MapError::InvalidDimensions { .. }
            | MapError::OutOfBounds { .. }
            | MapError::Occupied { .. }
            | MapError::DuplicatePlacement { .. } => ErrorCategory::InvalidArgument,
            MapError::UnitNotFound { .. } => ErrorCategory::NotFound,
            MapError::Unit(err) => err.category(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::InvalidDimensions { .. } => "MAP_INVALID_DIMENSIONS",
            MapError::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            MapError::Occupied { .. } => "MAP_POSITION_OCCUPIED",
            MapError::DuplicatePlacement { .. } => "MAP_DUPLICATE_PLACEMENT",
            MapError::UnitNotFound { .. } => "MAP_UNIT_NOT_FOUND",
            MapError::Unit(err) => err.error_code(),
        }
    }
}
