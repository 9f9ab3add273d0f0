//! Terrain names and the combat behaviors they share.
//!
//! A [`TerrainBehavior`] is the rules-relevant part of a tile: its combat
//! bonuses and, through the move cost table, its traversal cost. Many
//! [`Terrain`] names map to the same behavior (plains, roads and bridges all
//! behave as [`TerrainBehavior::Flat`]), so behaviors are a closed enum and
//! compare by identity.
use std::borrow::Cow;
use std::fmt;

/// Shared combat behavior of one or more terrain names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerrainBehavior {
    Desert,
    Fence,
    Flat,
    Forest,
    Fort,
    House,
    Lake,
    Mountain,
    Peak,
    Pillar,
    River,
    Ruins,
    Sand,
    Sea,
    Throne,
    Wall,
}

impl TerrainBehavior {
    /// Bonus to avoid granted to a unit standing on this terrain.
    pub const fn bonus_avoid(self) -> u32 {
        match self {
            Self::Desert | Self::Sand => 5,
            Self::House | Self::Lake | Self::Sea => 10,
            Self::Forest | Self::Fort | Self::Pillar | Self::Throne => 20,
            Self::Mountain => 30,
            Self::Peak => 40,
            Self::Fence | Self::Flat | Self::River | Self::Ruins | Self::Wall => 0,
        }
    }

    /// Bonus to defense granted to a unit standing on this terrain.
    pub const fn bonus_defense(self) -> u32 {
        match self {
            Self::Forest | Self::Mountain | Self::Peak | Self::Pillar => 1,
            Self::Fort | Self::Throne => 2,
            _ => 0,
        }
    }

    /// Bonus to resistance (magical defense). No built-in terrain grants any.
    pub const fn bonus_resistance(self) -> u32 {
        0
    }

    /// Dense index used by per-behavior lookup tables.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A named terrain paired with the behavior it uses.
///
/// Built-in terrains are available as associated constants; custom terrains
/// can be created with [`Terrain::custom`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    name: Cow<'static, str>,
    behavior: TerrainBehavior,
}

impl Terrain {
    pub const PLAINS: Terrain = Terrain::builtin("Plains", TerrainBehavior::Flat);
    pub const ROAD: Terrain = Terrain::builtin("Road", TerrainBehavior::Flat);
    pub const BRIDGE: Terrain = Terrain::builtin("Bridge", TerrainBehavior::Flat);
    pub const FOREST: Terrain = Terrain::builtin("Forest", TerrainBehavior::Forest);
    pub const MOUNTAIN: Terrain = Terrain::builtin("Mountain", TerrainBehavior::Mountain);
    pub const PEAK: Terrain = Terrain::builtin("Peak", TerrainBehavior::Peak);
    pub const HILL: Terrain = Terrain::builtin("Hill", TerrainBehavior::Mountain);
    pub const DESERT: Terrain = Terrain::builtin("Desert", TerrainBehavior::Desert);
    pub const SAND: Terrain = Terrain::builtin("Sand", TerrainBehavior::Sand);
    pub const RIVER: Terrain = Terrain::builtin("River", TerrainBehavior::River);
    pub const SEA: Terrain = Terrain::builtin("Sea", TerrainBehavior::Sea);
    pub const LAKE: Terrain = Terrain::builtin("Lake", TerrainBehavior::Lake);
    pub const FORT: Terrain = Terrain::builtin("Fort", TerrainBehavior::Fort);
    pub const GATE: Terrain = Terrain::builtin("Gate", TerrainBehavior::Fort);
    pub const HOUSE: Terrain = Terrain::builtin("House", TerrainBehavior::House);
    pub const VILLAGE: Terrain = Terrain::builtin("Village", TerrainBehavior::House);
    pub const RUINS: Terrain = Terrain::builtin("Ruins", TerrainBehavior::Ruins);
    pub const PILLAR: Terrain = Terrain::builtin("Pillar", TerrainBehavior::Pillar);
    pub const THRONE: Terrain = Terrain::builtin("Throne", TerrainBehavior::Throne);
    pub const FENCE: Terrain = Terrain::builtin("Fence", TerrainBehavior::Fence);
    pub const WALL: Terrain = Terrain::builtin("Wall", TerrainBehavior::Wall);

    /// Every built-in terrain, in catalog order.
    pub fn builtin_catalog() -> &'static [Terrain] {
        &BUILTIN_CATALOG
    }

    const fn builtin(name: &'static str, behavior: TerrainBehavior) -> Self {
        Self {
            name: Cow::Borrowed(name),
            behavior,
        }
    }

    /// Creates a terrain outside the built-in catalog.
    pub fn custom(name: impl Into<Cow<'static, str>>, behavior: TerrainBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
        }
    }

    /// Looks up a built-in terrain by name, ignoring ASCII case.
    pub fn builtin_named(name: &str) -> Option<Terrain> {
        BUILTIN_CATALOG
            .iter()
            .find(|terrain| terrain.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behavior(&self) -> TerrainBehavior {
        self.behavior
    }
}

static BUILTIN_CATALOG: [Terrain; 21] = [
    Terrain::PLAINS,
    Terrain::ROAD,
    Terrain::BRIDGE,
    Terrain::FOREST,
    Terrain::MOUNTAIN,
    Terrain::PEAK,
    Terrain::HILL,
    Terrain::DESERT,
    Terrain::SAND,
    Terrain::RIVER,
    Terrain::SEA,
    Terrain::LAKE,
    Terrain::FORT,
    Terrain::GATE,
    Terrain::HOUSE,
    Terrain::VILLAGE,
    Terrain::RUINS,
    Terrain::PILLAR,
    Terrain::THRONE,
    Terrain::FENCE,
    Terrain::WALL,
];

impl Default for Terrain {
    fn default() -> Self {
        Self::PLAINS
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn behavior_indices_are_dense() {
        for (expected, behavior) in TerrainBehavior::iter().enumerate() {
            assert_eq!(behavior.index(), expected);
        }
        assert_eq!(TerrainBehavior::COUNT, 16);
    }

    #[test]
    fn bonuses_match_catalog() {
        assert_eq!(TerrainBehavior::Forest.bonus_avoid(), 20);
        assert_eq!(TerrainBehavior::Forest.bonus_defense(), 1);
        assert_eq!(TerrainBehavior::Throne.bonus_defense(), 2);
        assert_eq!(TerrainBehavior::Peak.bonus_avoid(), 40);
        assert_eq!(TerrainBehavior::Flat.bonus_avoid(), 0);
        assert!(TerrainBehavior::iter().all(|b| b.bonus_resistance() == 0));
    }

    #[test]
    fn several_names_share_one_behavior() {
        let flat: Vec<_> = Terrain::builtin_catalog()
            .iter()
            .filter(|t| t.behavior() == TerrainBehavior::Flat)
            .map(Terrain::name)
            .collect();
        assert_eq!(flat, ["Plains", "Road", "Bridge"]);
    }

    #[test]
    fn every_catalog_entry_is_found_by_name() {
        let catalog = Terrain::builtin_catalog();
        assert_eq!(catalog.len(), 21);
        for terrain in catalog {
            let upper = terrain.name().to_ascii_uppercase();
            assert_eq!(Terrain::builtin_named(&upper).as_ref(), Some(terrain));
        }
    }

    #[test]
    fn builtin_lookup_ignores_case() {
        assert_eq!(Terrain::builtin_named("peak"), Some(Terrain::PEAK));
        assert_eq!(Terrain::builtin_named("WALL"), Some(Terrain::WALL));
        assert_eq!(Terrain::builtin_named("swamp"), None);
    }

    #[test]
    fn custom_terrain_keeps_its_name() {
        let swamp = Terrain::custom(String::from("Swamp"), TerrainBehavior::Forest);
        assert_eq!(swamp.name(), "Swamp");
        assert_eq!(swamp.behavior(), TerrainBehavior::Forest);
        assert_ne!(swamp, Terrain::FOREST);
        assert_eq!(Terrain::default(), Terrain::PLAINS);
    }

    #[test]
    fn behavior_names_round_trip_through_strings() {
        assert_eq!(TerrainBehavior::Mountain.to_string(), "mountain");
        assert_eq!("SEA".parse::<TerrainBehavior>(), Ok(TerrainBehavior::Sea));
    }
}
