//! Move cost table loader.
//!
//! A TOML file lists overrides that are layered, in file order, on top of the
//! standard move cost table:
//!
//! ```toml
//! [[override]]
//! behavior = "forest"
//! cost = 1
//! profiles = ["knight_a", "knight_b"]   # omit to apply to every profile
//!
//! [[override]]
//! behavior = "river"
//! cost = "impassable"
//! ```

use std::path::Path;

use serde::Deserialize;
use tactics_core::{MoveCost, MoveCostTable, MoveCostTableBuilder, MoveProfile, TerrainBehavior};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesToml {
    #[serde(default, rename = "override")]
    overrides: Vec<OverrideToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideToml {
    behavior: TerrainBehavior,
    cost: CostToml,
    profiles: Option<Vec<MoveProfile>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CostToml {
    Steps(u32),
    Named(String),
}

impl CostToml {
    fn resolve(&self) -> LoadResult<MoveCost> {
        match self {
            CostToml::Steps(steps) => Ok(MoveCost::new(*steps)),
            CostToml::Named(name) if name.eq_ignore_ascii_case("impassable") => {
                Ok(MoveCost::IMPASSABLE)
            }
            CostToml::Named(name) => Err(anyhow::anyhow!(
                "Invalid move cost '{}': expected a number or \"impassable\"",
                name
            )),
        }
    }
}

/// Loader for move cost overrides from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load overrides from a TOML file and apply them to the standard table.
    pub fn load(path: &Path) -> LoadResult<MoveCostTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load move costs {}: {}", path.display(), e))
    }

    /// Parse overrides from TOML text and apply them to the standard table.
    pub fn parse(content: &str) -> LoadResult<MoveCostTable> {
        let mut builder = MoveCostTableBuilder::standard();
        Self::apply(&mut builder, content)?;
        Ok(builder.build()?)
    }

    /// Apply the overrides in `content` to an existing builder.
    pub fn apply(builder: &mut MoveCostTableBuilder, content: &str) -> LoadResult<usize> {
        let data: TablesToml = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse move cost TOML: {}", e))?;

        for entry in &data.overrides {
            let cost = entry.cost.resolve()?;
            match &entry.profiles {
                Some(profiles) => builder.set(entry.behavior, cost, profiles),
                None => builder.set_all(entry.behavior, cost),
            };
        }

        tracing::debug!(overrides = data.overrides.len(), "applied move cost overrides");
        Ok(data.overrides.len())
    }
}
