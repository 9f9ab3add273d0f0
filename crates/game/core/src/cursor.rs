//! Cursor state machine that turns commands into a planned path.
//!
//! ```text
//!   MOVE --A--> SELECT      path := [position]
//!   SELECT --A--> MOVE      path handed back as Committed, then cleared
//!   direction in MOVE       cursor steps one cell
//!   direction in SELECT     cursor steps; the path grows (or truncates) if
//!                           the new cell touches its end and the candidate
//!                           stays within the move budget
//! ```
//!
//! The cursor never leaves the map: a step that would cross the edge is
//! reported as [`CursorOutcome::Blocked`] and changes nothing.
use std::sync::Arc;

use crate::config::{PlanningConfig, TerrainResolution};
use crate::error::{ErrorCategory, GameError};
use crate::grid::{Direction, Position};
use crate::input::Command;
use crate::map::{Map, MapError};
use crate::movement::{MoveCost, MoveCostTable, MoveProfile};
use crate::path::{Path, PathError};
use crate::terrain::TerrainBehavior;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CursorState {
    #[default]
    Move,
    Select,
}

/// What a single command did to the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CursorOutcome {
    /// The command has no meaning in the current state.
    Ignored,
    Moved { to: Position },
    /// The step would have left the map.
    Blocked { attempted: Position },
    SelectionStarted { origin: Position },
    PathUpdated { to: Position, cost: MoveCost },
    /// The cursor moved but the path did not, because the candidate was too
    /// expensive.
    PathRejected { to: Position, cost: MoveCost },
    /// The cursor moved to a cell that does not touch the end of the path.
    Detached { to: Position },
    /// Selection confirmed; the caller should execute this path.
    Committed(Path),
}

#[derive(Clone, Debug)]
pub struct Cursor {
    position: Position,
    state: CursorState,
    path: Path,
    profile: MoveProfile,
    budget: u32,
    resolution: TerrainResolution,
    table: Arc<MoveCostTable>,
}

impl Cursor {
    pub fn new(config: &PlanningConfig, table: Arc<MoveCostTable>) -> Self {
        Self {
            position: Position::ORIGIN,
            state: CursorState::Move,
            path: Path::empty(),
            profile: config.move_profile,
            budget: config.move_budget,
            resolution: config.terrain_resolution,
            table,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Path under construction. Empty outside [`CursorState::Select`].
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn move_profile(&self) -> MoveProfile {
        self.profile
    }

    /// Changes the profile used to score subsequent extensions.
    pub fn set_move_profile(&mut self, profile: MoveProfile) {
        if profile != self.profile {
            tracing::debug!(from = %self.profile, to = %profile, "cursor move profile changed");
            self.profile = profile;
        }
    }

    pub fn move_budget(&self) -> u32 {
        self.budget
    }

    pub fn table(&self) -> &MoveCostTable {
        &self.table
    }

    /// Processes one command against `map`.
    pub fn handle_command(&mut self, command: Command, map: &Map) -> Result<CursorOutcome, CursorError> {
        if command.is_confirm() {
            return Ok(self.confirm());
        }

        match command.direction() {
            Some(direction) => self.step(direction, map),
            None => Ok(CursorOutcome::Ignored),
        }
    }

    /// Cost of walking `path` with the cursor's profile.
    pub fn path_cost(&self, path: &Path, map: &Map) -> Result<MoveCost, CursorError> {
        let cost = match self.resolution {
            TerrainResolution::Map => {
                let behaviors = map.terrain_behaviors_along(path)?;
                self.table.path_cost(self.profile, behaviors)
            }
            TerrainResolution::Flat => self.table.path_cost(
                self.profile,
                std::iter::repeat_n(TerrainBehavior::Flat, path.len()),
            ),
        };
        Ok(cost)
    }

    fn confirm(&mut self) -> CursorOutcome {
        match self.state {
            CursorState::Move => {
                self.state = CursorState::Select;
                self.path = Path::singleton(self.position);
                tracing::debug!(origin = %self.position, "selection started");
                CursorOutcome::SelectionStarted {
                    origin: self.position,
                }
            }
            CursorState::Select => {
                self.state = CursorState::Move;
                let path = std::mem::take(&mut self.path);
                tracing::debug!(%path, "selection committed");
                CursorOutcome::Committed(path)
            }
        }
    }

    fn step(&mut self, direction: Direction, map: &Map) -> Result<CursorOutcome, CursorError> {
        let next = self.position.translated(direction);
        if !map.contains(next) {
            tracing::debug!(from = %self.position, %direction, "cursor blocked at map edge");
            return Ok(CursorOutcome::Blocked { attempted: next });
        }
        self.position = next;

        if self.state != CursorState::Select {
            return Ok(CursorOutcome::Moved { to: next });
        }

        let end = self.path.end()?;
        if !end.is_adjacent_to(next) {
            tracing::debug!(%end, to = %next, "cursor detached from path");
            return Ok(CursorOutcome::Detached { to: next });
        }

        let candidate = self.path.concat(next)?;
        let cost = self.path_cost(&candidate, map)?;
        if cost.within(self.budget) {
            tracing::debug!(to = %next, %cost, len = candidate.len(), "path extended");
            self.path = candidate;
            Ok(CursorOutcome::PathUpdated { to: next, cost })
        } else {
            tracing::debug!(to = %next, %cost, budget = self.budget, "path extension rejected");
            Ok(CursorOutcome::PathRejected { to: next, cost })
        }
    }
}

/// Errors raised while the cursor consults the map or its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl GameError for CursorError {
    fn category(&self) -> ErrorCategory {
        match self {
            CursorError::Map(err) => err.category(),
            CursorError::Path(err) => err.category(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CursorError::Map(err) => err.error_code(),
            CursorError::Path(err) => err.error_code(),
        }
    }
}
