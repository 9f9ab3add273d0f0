//! Planning session: one map, its units, and the cursor driving them.
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use tactics_content::LoadedMap;
use tactics_core::{
    Command, Cursor, CursorOutcome, ExecuteError, Map, MapEvent, MoveCostTable, MoveExecution,
    MoveProfile, PlanningConfig, Position, TerrainBehavior, Unit, UnitId, execute_path,
};

/// Everything one command caused.
#[derive(Debug)]
pub struct SessionUpdate {
    pub command: Command,
    pub outcome: CursorOutcome,
    /// Present when a committed path started on a unit.
    pub execution: Option<Result<MoveExecution, ExecuteError>>,
    /// Map notifications fired while processing the command.
    pub events: Vec<MapEvent>,
}

pub struct Session {
    map: Map,
    units: Vec<Unit>,
    cursor: Cursor,
    default_profile: MoveProfile,
    events: Arc<Mutex<Vec<MapEvent>>>,
}

impl Session {
    pub fn new(loaded: LoadedMap, config: &PlanningConfig, table: Arc<MoveCostTable>) -> Self {
        let LoadedMap { mut map, units } = loaded;

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        map.subscribe(move |event: &MapEvent| {
            tracing::info!(kind = event.kind(), ?event, "map event");
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        });

        Self {
            map,
            units,
            cursor: Cursor::new(config, table),
            default_profile: config.move_profile,
            events,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    /// Routes one command through the cursor and applies its consequences.
    ///
    /// Starting a selection on a unit scores the path with that unit's
    /// profile. Committing a path that starts on a unit moves the unit.
    pub fn handle_command(&mut self, command: Command) -> Result<SessionUpdate> {
        let outcome = self.cursor.handle_command(command, &self.map)?;
        let mut execution = None;

        match &outcome {
            CursorOutcome::SelectionStarted { origin } => {
                let profile = self.profile_at(*origin)?;
                self.cursor.set_move_profile(profile);
            }
            CursorOutcome::Committed(path) => {
                let origin = path.start()?;
                if self.map.unit_at(origin)?.is_some() {
                    let result = execute_path(&mut self.map, path);
                    if let Err(err) = &result {
                        tracing::warn!(%path, error = %err, "committed path could not be executed");
                    }
                    execution = Some(result);
                } else {
                    tracing::info!(%path, "committed path has no unit at its origin");
                }
                self.cursor.set_move_profile(self.default_profile);
            }
            _ => {}
        }

        Ok(SessionUpdate {
            command,
            outcome,
            execution,
            events: self.drain_events(),
        })
    }

    fn profile_at(&self, position: Position) -> Result<MoveProfile> {
        let profile = self
            .map
            .unit_at(position)?
            .and_then(|id| self.unit(id))
            .map_or(self.default_profile, Unit::move_profile);
        Ok(profile)
    }

    fn drain_events(&self) -> Vec<MapEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// One-line summary of the cursor and the cell under it.
    pub fn status_line(&self) -> String {
        let cursor = &self.cursor;
        let position = cursor.position();
        let mut line = format!("[{}] {}", cursor.state(), position);

        if let Ok(tile) = self.map.tile(position) {
            let _ = write!(line, " {}", tile.terrain);
            if let Some(unit) = tile.unit.and_then(|id| self.unit(id)) {
                let _ = write!(line, " | {} {}", unit.id(), unit.class());
            }
        }

        let _ = write!(line, " | profile {}", cursor.move_profile());
        if !cursor.path().is_empty() {
            let cost = cursor
                .path_cost(cursor.path(), &self.map)
                .map(|cost| cost.to_string())
                .unwrap_or_else(|_| "?".to_string());
            let _ = write!(
                line,
                " | path {} cost {}/{}",
                cursor.path().len(),
                cost,
                cursor.move_budget()
            );
        }
        line
    }

    /// Text rendering of the map, top row first (y grows upward).
    ///
    /// `@` is the cursor, `*` the planned path, digits are unit ids (mod 10),
    /// anything else is a terrain glyph.
    pub fn render_rows(&self) -> Vec<String> {
        let dimensions = self.map.dimensions();
        let cursor = self.cursor.position();
        let path = self.cursor.path();

        (0..dimensions.height as i32)
            .rev()
            .map(|y| {
                (0..dimensions.width as i32)
                    .map(|x| {
                        let position = Position::new(x, y);
                        let Ok(tile) = self.map.tile(position) else {
                            return ' ';
                        };
                        if position == cursor {
                            '@'
                        } else if let Some(unit) = tile.unit {
                            char::from_digit(unit.0 % 10, 10).unwrap_or('u')
                        } else if path.contains(position) {
                            '*'
                        } else {
                            terrain_glyph(tile.behavior())
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

pub fn terrain_glyph(behavior: TerrainBehavior) -> char {
    match behavior {
        TerrainBehavior::Flat => '.',
        TerrainBehavior::Forest => 'T',
        TerrainBehavior::Mountain => 'm',
        TerrainBehavior::Peak => 'M',
        TerrainBehavior::River | TerrainBehavior::Sea | TerrainBehavior::Lake => '~',
        TerrainBehavior::Desert | TerrainBehavior::Sand => ':',
        TerrainBehavior::Fort | TerrainBehavior::Throne => 'F',
        TerrainBehavior::House => 'h',
        TerrainBehavior::Ruins | TerrainBehavior::Pillar => 'i',
        TerrainBehavior::Fence => '=',
        TerrainBehavior::Wall => '#',
    }
}
