//! Applies a committed path to the map.
use crate::error::{ErrorCategory, GameError};
use crate::grid::Position;
use crate::map::{Map, MapError};
use crate::path::Path;
use crate::unit::UnitId;

/// Result of a successful [`execute_path`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveExecution {
    pub unit: UnitId,
    pub from: Position,
    pub to: Position,
    /// Number of cells walked (path length minus the origin).
    pub steps: usize,
}

impl MoveExecution {
    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// Moves the unit standing on the path's origin to the path's end.
///
/// Every cell of the path must lie on the map. A path that starts and ends
/// on the same cell leaves the map untouched and fires no notification.
pub fn execute_path(map: &mut Map, path: &Path) -> Result<MoveExecution, ExecuteError> {
    let from = path.start().map_err(|_| ExecuteError::EmptyPath)?;
    let to = path.end().map_err(|_| ExecuteError::EmptyPath)?;

    // Pre-validate the whole route before touching the map.
    map.terrain_behaviors_along(path)?;

    let unit = map
        .unit_at(from)?
        .ok_or(ExecuteError::NoUnitAtOrigin { position: from })?;

    let execution = MoveExecution {
        unit,
        from,
        to,
        steps: path.len() - 1,
    };

    if execution.is_stationary() {
        tracing::debug!(%unit, position = %from, "path execution without movement");
        return Ok(execution);
    }

    map.move_unit_to(to, unit)?;
    tracing::debug!(%unit, %from, %to, steps = execution.steps, "executed path");
    Ok(execution)
}

/// Errors surfaced while executing a committed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("cannot execute an empty path")]
    EmptyPath,

    #[error("no unit stands at path origin {position}")]
    NoUnitAtOrigin { position: Position },

    #[error("map rejected the move: {0}")]
    Map(#[from] MapError),
}

impl GameError for ExecuteError {
    fn category(&self) -> ErrorCategory {
        match self {
            ExecuteError::EmptyPath => ErrorCategory::InvalidArgument,
            ExecuteError::NoUnitAtOrigin { .. } => ErrorCategory::NotFound,
            ExecuteError::Map(err) => err.category(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::EmptyPath => "EXECUTE_EMPTY_PATH",
            ExecuteError::NoUnitAtOrigin { .. } => "EXECUTE_NO_UNIT_AT_ORIGIN",
            ExecuteError::Map(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::map::MapEvent;
    use crate::unit::{Unit, UnitClass};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn map_with_unit(at: Position) -> (Map, Unit) {
        let mut map = Map::new(5, 5).unwrap();
        let mut unit = Unit::new(UnitId(1), UnitClass::Mercenary);
        map.add_unit(at, &mut unit).unwrap();
        (map, unit)
    }

    #[test]
    fn moves_unit_from_origin_to_end() {
        let (mut map, unit) = map_with_unit(p(0, 0));
        let path = Path::new([p(0, 0), p(0, 1), p(1, 1)]).unwrap();

        let execution = execute_path(&mut map, &path).unwrap();

        assert_eq!(
            execution,
            MoveExecution {
                unit: UnitId(1),
                from: p(0, 0),
                to: p(1, 1),
                steps: 2,
            }
        );
        assert_eq!(unit.position(&map), Ok(p(1, 1)));
    }

    #[test]
    fn singleton_path_is_a_no_op() {
        let (mut map, _unit) = map_with_unit(p(2, 2));
        let events = Arc::new(Mutex::new(Vec::<MapEvent>::new()));
        let sink = Arc::clone(&events);
        map.subscribe(move |event: &MapEvent| sink.lock().unwrap().push(event.clone()));

        let execution = execute_path(&mut map, &Path::new([p(2, 2)]).unwrap()).unwrap();

        assert!(execution.is_stationary());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_path_is_rejected() {
        let (mut map, _unit) = map_with_unit(p(0, 0));
        assert_eq!(
            execute_path(&mut map, &Path::empty()),
            Err(ExecuteError::EmptyPath)
        );
    }

    #[test]
    fn origin_without_unit_is_not_found() {
        let (mut map, _unit) = map_with_unit(p(0, 0));
        let path = Path::new([p(3, 3), p(3, 4)]).unwrap();

        let err = execute_path(&mut map, &path).unwrap_err();
        assert_eq!(err, ExecuteError::NoUnitAtOrigin { position: p(3, 3) });
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn off_map_route_leaves_unit_in_place() {
        let (mut map, unit) = map_with_unit(p(4, 0));
        let path = Path::new([p(4, 0), p(5, 0)]).unwrap();

        let err = execute_path(&mut map, &path).unwrap_err();
        assert!(matches!(err, ExecuteError::Map(MapError::OutOfBounds { .. })));
        assert_eq!(unit.position(&map), Ok(p(4, 0)));
    }
}
