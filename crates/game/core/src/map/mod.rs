//! Fixed-size battle map: one terrain and at most one unit per cell.
//!
//! The map owns the authoritative placement index in both directions
//! (cell to unit, unit to cell). Units only carry a handle to the map while
//! placed, and that handle expires when the map is dropped. Every successful mutation is announced to subscribed
//! [`MapObserver`]s after it has taken effect.
mod error;
mod event;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

pub use error::MapError;
pub use event::{MapEvent, MapObserver, ObserverId};

use crate::grid::{MapDimensions, Position};
use crate::path::Path;
use crate::terrain::{Terrain, TerrainBehavior};
use crate::unit::{Unit, UnitId};

static NEXT_MAP_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a [`Map`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapId(pub u32);

impl MapId {
    fn next() -> Self {
        Self(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

/// Link from a placed unit back to its map.
///
/// Holds no strong reference: once the map is dropped the handle reports no
/// map, so the unit can be placed again.
#[derive(Clone, Debug)]
pub(crate) struct MapHandle {
    id: MapId,
    alive: Weak<()>,
}

impl MapHandle {
    pub(crate) fn live_id(&self) -> Option<MapId> {
        (self.alive.strong_count() > 0).then_some(self.id)
    }
}

impl PartialEq for MapHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MapHandle {}

/// Read-only view of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile<'a> {
    pub position: Position,
    pub unit: Option<UnitId>,
    pub terrain: &'a Terrain,
}

impl Tile<'_> {
    pub fn is_occupied(&self) -> bool {
        self.unit.is_some()
    }

    pub fn behavior(&self) -> TerrainBehavior {
        self.terrain.behavior()
    }
}

pub struct Map {
    id: MapId,
    dimensions: MapDimensions,
    terrain: Vec<Terrain>,
    occupants: Vec<Option<UnitId>>,
    placements: BTreeMap<UnitId, Position>,
    observers: Vec<(ObserverId, Box<dyn MapObserver>)>,
    next_observer: u64,
    alive: Arc<()>,
}

impl Map {
    /// Largest number of cells a map may cover.
    pub const MAX_AREA: usize = 1 << 20;

    /// Creates a `width` x `height` map covered in [`Terrain::PLAINS`].
    pub fn new(width: u32, height: u32) -> Result<Self, MapError> {
        Self::filled(width, height, Terrain::default())
    }

    /// Creates a map with every cell set to `terrain`.
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Result<Self, MapError> {
        let dimensions = MapDimensions::new(width, height);
        let area = dimensions
            .area()
            .filter(|area| (1..=Self::MAX_AREA).contains(area))
            .ok_or(MapError::InvalidDimensions { width, height })?;

        Ok(Self {
            id: MapId::next(),
            dimensions,
            terrain: vec![terrain; area],
            occupants: vec![None; area],
            placements: BTreeMap::new(),
            observers: Vec::new(),
            next_observer: 0,
            alive: Arc::new(()),
        })
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub(crate) fn handle(&self) -> MapHandle {
        MapHandle {
            id: self.id,
            alive: Arc::downgrade(&self.alive),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Unit standing at `position`, if any.
    pub fn unit_at(&self, position: Position) -> Result<Option<UnitId>, MapError> {
        let index = self.index(position)?;
        Ok(self.occupants[index])
    }

    pub fn is_occupied(&self, position: Position) -> Result<bool, MapError> {
        self.unit_at(position).map(|unit| unit.is_some())
    }

    pub fn terrain_at(&self, position: Position) -> Result<&Terrain, MapError> {
        let index = self.index(position)?;
        Ok(&self.terrain[index])
    }

    pub fn tile(&self, position: Position) -> Result<Tile<'_>, MapError> {
        let index = self.index(position)?;
        Ok(Tile {
            position,
            unit: self.occupants[index],
            terrain: &self.terrain[index],
        })
    }

    /// Current position of `unit` on this map.
    pub fn position_of(&self, unit: UnitId) -> Result<Position, MapError> {
        self.placements
            .get(&unit)
            .copied()
            .ok_or(MapError::UnitNotFound { unit })
    }

    pub fn contains_unit(&self, unit: UnitId) -> bool {
        self.placements.contains_key(&unit)
    }

    /// All placed units with their positions, ordered by unit id.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, Position)> + '_ {
        self.placements.iter().map(|(unit, position)| (*unit, *position))
    }

    /// Terrain behavior of every cell along `path`, in path order.
    pub fn terrain_behaviors_along(&self, path: &Path) -> Result<Vec<TerrainBehavior>, MapError> {
        path.iter()
            .map(|position| self.terrain_at(*position).map(Terrain::behavior))
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Places `unit` at `position` and marks it as being on this map.
    pub fn add_unit(&mut self, position: Position, unit: &mut Unit) -> Result<(), MapError> {
        let index = self.index(position)?;
        let id = unit.id();

        if let Some(existing) = self.placements.get(&id) {
            return Err(MapError::DuplicatePlacement {
                unit: id,
                position: *existing,
            });
        }
        if let Some(occupant) = self.occupants[index] {
            return Err(MapError::Occupied { position, occupant });
        }
        unit.attach(self.handle())?;

        self.occupants[index] = Some(id);
        self.placements.insert(id, position);

        self.notify(MapEvent::UnitAdded {
            map: self.id,
            unit: id,
            position,
        });
        Ok(())
    }

    /// Removes `unit` from this map, returning the cell it stood on.
    pub fn remove_unit(&mut self, unit: &mut Unit) -> Result<Position, MapError> {
        let id = unit.id();
        if unit.map_id() != Some(self.id) {
            return Err(MapError::UnitNotFound { unit: id });
        }
        let position = self.position_of(id)?;
        let index = self.index(position)?;

        self.occupants[index] = None;
        self.placements.remove(&id);
        unit.detach();

        self.notify(MapEvent::UnitRemoved {
            map: self.id,
            unit: id,
            position,
        });
        Ok(position)
    }

    /// Relocates a placed unit, returning its previous position.
    ///
    /// Internal primitive behind path execution; the unit's map handle is
    /// unaffected because it stays on the same map.
    pub(crate) fn move_unit_to(&mut self, position: Position, unit: UnitId) -> Result<Position, MapError> {
        let to = self.index(position)?;
        let from_position = self.position_of(unit)?;
        if let Some(occupant) = self.occupants[to] {
            return Err(MapError::Occupied { position, occupant });
        }
        let from = self.index(from_position)?;

        self.occupants[from] = None;
        self.occupants[to] = Some(unit);
        self.placements.insert(unit, position);

        self.notify(MapEvent::UnitMoved {
            map: self.id,
            unit,
            from: from_position,
            to: position,
        });
        Ok(from_position)
    }

    /// Replaces the terrain at `position`, returning the previous terrain.
    pub fn set_terrain_at(&mut self, position: Position, terrain: Terrain) -> Result<Terrain, MapError> {
        let index = self.index(position)?;
        let previous = std::mem::replace(&mut self.terrain[index], terrain.clone());

        self.notify(MapEvent::TerrainChanged {
            map: self.id,
            position,
            previous: previous.clone(),
            current: terrain,
        });
        Ok(previous)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Registers an observer; it will see every subsequent event.
    pub fn subscribe(&mut self, observer: impl MapObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a previously registered observer. Returns `false` if unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, event: MapEvent) {
        tracing::trace!(map = %self.id, kind = event.kind(), observers = self.observers.len(), "map event");
        for (_, observer) in &mut self.observers {
            observer.on_map_event(&event);
        }
    }

    fn index(&self, position: Position) -> Result<usize, MapError> {
        if !self.dimensions.contains(position) {
            return Err(MapError::OutOfBounds {
                position,
                dimensions: self.dimensions,
            });
        }
        Ok(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("id", &self.id)
            .field("dimensions", &self.dimensions)
            .field("units", &self.placements)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
