//! Deterministic movement-planning rules for a grid tactics game.
//!
//! `tactics-core` defines the grid, terrain, move cost table, paths, the
//! battle map, and the cursor state machine that plans moves across it. It
//! performs no I/O; content loading and input handling live in sibling crates
//! that depend on the types re-exported here.
pub mod config;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod input;
pub mod map;
pub mod movement;
pub mod path;
pub mod terrain;
pub mod unit;

pub use config::{PlanningConfig, TerrainResolution};
pub use cursor::{Cursor, CursorError, CursorOutcome, CursorState};
pub use error::{ErrorCategory, GameError};
pub use grid::{Direction, GridError, MapDimensions, Position};
pub use input::Command;
pub use map::{Map, MapError, MapEvent, MapId, MapObserver, ObserverId, Tile};
pub use movement::{
    ExecuteError, MoveCost, MoveCostError, MoveCostTable, MoveCostTableBuilder, MoveExecution,
    MoveProfile, execute_path,
};
pub use path::{Path, PathError};
pub use terrain::{Terrain, TerrainBehavior};
pub use unit::{Unit, UnitClass, UnitError, UnitId, UnitType};
