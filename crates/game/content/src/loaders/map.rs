//! Map layout loader.
//!
//! Loads terrain and unit placement from map RON files. Cells not listed in
//! `tiles` keep the map's default terrain (plains).

use std::path::Path;

use serde::Deserialize;
use tactics_core::{Map, Position, Terrain, TerrainBehavior, Unit, UnitClass, UnitId};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    custom_terrain: Vec<CustomTerrainRon>,
    #[serde(default)]
    tiles: Vec<(i32, i32, String)>, // (x, y, terrain name)
    #[serde(default)]
    units: Vec<(u32, UnitClass, i32, i32)>, // (id, class, x, y)
}

#[derive(Debug, Clone, Deserialize)]
struct CustomTerrainRon {
    name: String,
    behavior: TerrainBehavior,
}

/// A map together with the units placed on it.
#[derive(Debug)]
pub struct LoadedMap {
    pub map: Map,
    pub units: Vec<Unit>,
}

impl LoadedMap {
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<LoadedMap> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    /// Parse a map layout from RON text.
    pub fn parse(content: &str) -> LoadResult<LoadedMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        let mut map = Map::new(width, height)?;

        for (x, y, name) in &data.tiles {
            let terrain = resolve_terrain(name, &data.custom_terrain)?;
            map.set_terrain_at(Position::new(*x, *y), terrain)
                .map_err(|e| anyhow::anyhow!("Invalid tile ({}, {}): {}", x, y, e))?;
        }

        let mut units = Vec::with_capacity(data.units.len());
        for (id, class, x, y) in data.units {
            let mut unit = Unit::new(UnitId(id), class);
            map.add_unit(Position::new(x, y), &mut unit)
                .map_err(|e| anyhow::anyhow!("Cannot place unit {} at ({}, {}): {}", id, x, y, e))?;
            units.push(unit);
        }

        tracing::debug!(
            width,
            height,
            tiles = data.tiles.len(),
            units = units.len(),
            "loaded map layout"
        );

        Ok(LoadedMap { map, units })
    }
}

/// Custom terrain declared in the file takes precedence over the catalog.
fn resolve_terrain(name: &str, custom: &[CustomTerrainRon]) -> LoadResult<Terrain> {
    if let Some(entry) = custom.iter().find(|c| c.name.eq_ignore_ascii_case(name)) {
        return Ok(Terrain::custom(entry.name.clone(), entry.behavior));
    }

    Terrain::builtin_named(name).ok_or_else(|| anyhow::anyhow!("Unknown terrain '{}'", name))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::MoveProfile;

    use super::*;

    const LAYOUT: &str = r#"(
        dimensions: (4, 3),
        custom_terrain: [
            (name: "Swamp", behavior: forest),
        ],
        tiles: [
            (1, 1, "Forest"),
            (2, 1, "swamp"),
            (3, 2, "PEAK"),
        ],
        units: [
            (1, mercenary, 0, 0),
            (2, wyvern_knight, 3, 0),
        ],
    )"#;

    #[test]
    fn parses_terrain_and_units() {
        let loaded = MapLoader::parse(LAYOUT).unwrap();
        let map = &loaded.map;

        assert_eq!((map.width(), map.height()), (4, 3));
        assert_eq!(map.terrain_at(Position::new(0, 0)).unwrap(), &Terrain::PLAINS);
        assert_eq!(map.terrain_at(Position::new(1, 1)).unwrap(), &Terrain::FOREST);
        assert_eq!(map.terrain_at(Position::new(3, 2)).unwrap(), &Terrain::PEAK);

        let swamp = map.terrain_at(Position::new(2, 1)).unwrap();
        assert_eq!(swamp.name(), "Swamp");
        assert_eq!(swamp.behavior(), TerrainBehavior::Forest);

        let wyvern = loaded.unit(UnitId(2)).unwrap();
        assert_eq!(wyvern.move_profile(), MoveProfile::Flyer);
        assert_eq!(wyvern.position(map).unwrap(), Position::new(3, 0));
        assert_eq!(map.units().count(), 2);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAYOUT.as_bytes()).unwrap();

        let loaded = MapLoader::load(file.path()).unwrap();
        assert_eq!(loaded.units.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");

        let err = MapLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.ron"));
    }

    #[test]
    fn unknown_terrain_is_rejected() {
        let err = MapLoader::parse(r#"(dimensions: (2, 2), tiles: [(0, 0, "Lava")])"#).unwrap_err();
        assert!(err.to_string().contains("Lava"));
    }

    #[test]
    fn out_of_bounds_tile_is_rejected() {
        assert!(MapLoader::parse(r#"(dimensions: (2, 2), tiles: [(2, 0, "Forest")])"#).is_err());
    }

    #[test]
    fn overlapping_units_are_rejected() {
        let err = MapLoader::parse(
            "(dimensions: (2, 2), units: [(1, mercenary, 0, 0), (2, mage, 0, 0)])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn zero_sized_maps_are_rejected() {
        assert!(MapLoader::parse("(dimensions: (0, 3))").is_err());
    }

    #[test]
    fn oversized_maps_are_rejected() {
        let err = MapLoader::parse("(dimensions: (4294967295, 4294967295))").unwrap_err();
        assert!(err.to_string().contains("4294967295x4294967295"), "{err}");
    }

    #[test]
    fn bundled_skirmish_layout_parses() {
        let loaded = MapLoader::parse(crate::SKIRMISH_MAP).unwrap();
        assert!(!loaded.units.is_empty());
    }
}
