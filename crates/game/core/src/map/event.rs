//! Change notifications fired by [`Map`](super::Map) after each mutation.
use crate::grid::Position;
use crate::terrain::Terrain;
use crate::unit::UnitId;

use super::MapId;

/// A mutation that has already taken effect on a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEvent {
    UnitAdded {
        map: MapId,
        unit: UnitId,
        position: Position,
    },
    UnitRemoved {
        map: MapId,
        unit: UnitId,
        position: Position,
    },
    UnitMoved {
        map: MapId,
        unit: UnitId,
        from: Position,
        to: Position,
    },
    TerrainChanged {
        map: MapId,
        position: Position,
        previous: Terrain,
        current: Terrain,
    },
}

impl MapEvent {
    /// Map that emitted the event.
    pub fn map(&self) -> MapId {
        match self {
            MapEvent::UnitAdded { map, .. }
            | MapEvent::UnitRemoved { map, .. }
            | MapEvent::UnitMoved { map, .. }
            | MapEvent::TerrainChanged { map, .. } => *map,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MapEvent::UnitAdded { .. } => "unit_added",
            MapEvent::UnitRemoved { .. } => "unit_removed",
            MapEvent::UnitMoved { .. } => "unit_moved",
            MapEvent::TerrainChanged { .. } => "terrain_changed",
        }
    }
}

/// Receives map change notifications synchronously.
///
/// Observers are invoked in registration order, each one for a given event
/// before the mutating call returns. An observer only sees the event; it holds
/// no reference to the map and therefore cannot mutate it or its observer list
/// during dispatch.
pub trait MapObserver: Send {
    fn on_map_event(&mut self, event: &MapEvent);
}

impl<F> MapObserver for F
where
    F: FnMut(&MapEvent) + Send,
{
    fn on_map_event(&mut self, event: &MapEvent) {
        self(event)
    }
}

/// Handle returned by [`Map::subscribe`](super::Map::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(super) u64);
