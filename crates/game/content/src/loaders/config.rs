//! Planning configuration loader.

use std::path::Path;

use tactics_core::PlanningConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for planning configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<PlanningConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PlanningConfig> {
        let config: PlanningConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::{MoveProfile, TerrainResolution};

    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ConfigLoader::parse("move_budget = 5").unwrap();
        assert_eq!(config.move_budget, 5);
        assert_eq!(config.move_profile, PlanningConfig::DEFAULT_MOVE_PROFILE);
        assert_eq!(config.terrain_resolution, TerrainResolution::Map);
    }

    #[test]
    fn loads_all_fields_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "move_budget = 9\nmove_profile = \"flyer\"\nterrain_resolution = \"flat\""
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(
            config,
            PlanningConfig::new()
                .with_move_budget(9)
                .with_move_profile(MoveProfile::Flyer)
                .with_terrain_resolution(TerrainResolution::Flat)
        );
    }

    #[test]
    fn rejects_unknown_profiles() {
        assert!(ConfigLoader::parse("move_profile = \"glider\"").is_err());
    }
}
