use crate::movement::MoveProfile;

/// How the cursor resolves each path cell to a terrain behavior when scoring.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerrainResolution {
    /// Use the terrain actually stored on the map.
    #[default]
    Map,
    /// Treat every cell as flat ground regardless of the map.
    Flat,
}

/// Planning configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanningConfig {
    /// Maximum total cost a planned path may reach.
    pub move_budget: u32,
    /// Profile used to score paths until a unit is selected.
    pub move_profile: MoveProfile,
    pub terrain_resolution: TerrainResolution,
}

impl PlanningConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_BUDGET: u32 = 7;
    pub const DEFAULT_MOVE_PROFILE: MoveProfile = MoveProfile::Foot;

    pub fn new() -> Self {
        Self {
            move_budget: Self::DEFAULT_MOVE_BUDGET,
            move_profile: Self::DEFAULT_MOVE_PROFILE,
            terrain_resolution: TerrainResolution::Map,
        }
    }

    pub fn with_move_budget(mut self, move_budget: u32) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_move_profile(mut self, move_profile: MoveProfile) -> Self {
        self.move_profile = move_profile;
        self
    }

    pub fn with_terrain_resolution(mut self, terrain_resolution: TerrainResolution) -> Self {
        self.terrain_resolution = terrain_resolution;
        self
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self::new()
    }
}
