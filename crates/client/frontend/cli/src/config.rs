//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tactics_core::{Command, MoveProfile, PlanningConfig, TerrainResolution};

/// Terminal client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Defaults with environment overrides applied.
    pub planning: PlanningConfig,
    pub planning_overrides: PlanningOverrides,
    pub input: InputConfig,
    pub content: ContentConfig,
    /// Commands to run headless instead of reading the keyboard.
    pub script: Option<Vec<Command>>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONFIG_FILE` - Planning config TOML, applied before the overrides below
    /// - `TACTICS_MOVE_BUDGET` - Maximum path cost (default: 7)
    /// - `TACTICS_MOVE_PROFILE` - Profile used when no unit is selected (default: foot)
    /// - `TACTICS_TERRAIN_RESOLUTION` - `map` or `flat` (default: map)
    /// - `TACTICS_INPUT_DEBOUNCE_MS` - Minimum delay between accepted keys (default: 70)
    /// - `TACTICS_MAP_FILE` - RON map layout (default: built-in skirmish)
    /// - `TACTICS_MOVE_COSTS_FILE` - TOML move cost overrides
    /// - `TACTICS_SCRIPT` - Comma-separated commands for a headless run, e.g. `a,up,up,a`
    /// - `TACTICS_ECHO_EVENTS` - Print map events in headless runs (default: true)
    /// - `TACTICS_SESSION_ID` - Log session directory name (default: timestamp)
    /// - `TACTICS_LOG_DIR` - Log root directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.content.config_file = lookup("TACTICS_CONFIG_FILE").map(PathBuf::from);

        config.planning_overrides = PlanningOverrides {
            move_budget: read_env(&lookup, "TACTICS_MOVE_BUDGET"),
            move_profile: read_env(&lookup, "TACTICS_MOVE_PROFILE"),
            terrain_resolution: read_env(&lookup, "TACTICS_TERRAIN_RESOLUTION"),
        };
        config.planning = config.planning_overrides.apply(PlanningConfig::default());

        if let Some(ms) = read_env::<u64, _>(&lookup, "TACTICS_INPUT_DEBOUNCE_MS") {
            config.input.debounce = Duration::from_millis(ms);
        }
        if let Some(echo) = read_env_bool(&lookup, "TACTICS_ECHO_EVENTS") {
            config.input.echo_events = echo;
        }

        config.content.map_file = lookup("TACTICS_MAP_FILE").map(PathBuf::from);
        config.content.move_costs_file = lookup("TACTICS_MOVE_COSTS_FILE").map(PathBuf::from);
        config.script = lookup("TACTICS_SCRIPT").map(|raw| parse_script(&raw));
        config.session_id = lookup("TACTICS_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("TACTICS_LOG_DIR").map(PathBuf::from);

        config
    }
}

/// Planning settings given explicitly in the environment.
///
/// Kept separately so they can be layered over a planning config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanningOverrides {
    pub move_budget: Option<u32>,
    pub move_profile: Option<MoveProfile>,
    pub terrain_resolution: Option<TerrainResolution>,
}

impl PlanningOverrides {
    pub fn apply(&self, mut base: PlanningConfig) -> PlanningConfig {
        if let Some(budget) = self.move_budget {
            base.move_budget = budget;
        }
        if let Some(profile) = self.move_profile {
            base.move_profile = profile;
        }
        if let Some(resolution) = self.terrain_resolution {
            base.terrain_resolution = resolution;
        }
        base
    }
}

/// Input layer configuration.
#[derive(Clone, Debug)]
pub struct InputConfig {
    /// Keys arriving sooner than this after the last accepted key are dropped.
    pub debounce: Duration,
    pub echo_events: bool,
}

impl InputConfig {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(70);
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce: Self::DEFAULT_DEBOUNCE,
            echo_events: true,
        }
    }
}

/// Where to load content from. `None` selects the built-in data.
#[derive(Clone, Debug, Default)]
pub struct ContentConfig {
    pub config_file: Option<PathBuf>,
    pub map_file: Option<PathBuf>,
    pub move_costs_file: Option<PathBuf>,
}

/// Parses `a, up,UP ,start`. Unknown names are skipped.
fn parse_script(raw: &str) -> Vec<Command> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match name.parse::<Command>() {
            Ok(command) => Some(command),
            Err(_) => {
                tracing::warn!(name, "ignoring unknown script command");
                None
            }
        })
        .collect()
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

fn read_env_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key)?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.planning, PlanningConfig::default());
        assert_eq!(config.input.debounce, Duration::from_millis(70));
        assert!(config.input.echo_events);
        assert!(config.script.is_none());
        assert!(config.content.map_file.is_none());
    }

    #[test]
    fn reads_planning_overrides() {
        let config = config_from(&[
            ("TACTICS_MOVE_BUDGET", "5"),
            ("TACTICS_MOVE_PROFILE", "Knight_A"),
            ("TACTICS_TERRAIN_RESOLUTION", "FLAT"),
            ("TACTICS_INPUT_DEBOUNCE_MS", "0"),
        ]);
        assert_eq!(config.planning.move_budget, 5);
        assert_eq!(config.planning.move_profile, MoveProfile::KnightA);
        assert_eq!(config.planning.terrain_resolution, TerrainResolution::Flat);
        assert_eq!(config.input.debounce, Duration::ZERO);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("TACTICS_MOVE_BUDGET", "lots"),
            ("TACTICS_MOVE_PROFILE", "glider"),
            ("TACTICS_ECHO_EVENTS", "maybe"),
        ]);
        assert_eq!(config.planning.move_budget, PlanningConfig::DEFAULT_MOVE_BUDGET);
        assert_eq!(config.planning.move_profile, MoveProfile::Foot);
        assert!(config.input.echo_events);
    }

    #[test]
    fn overrides_layer_over_a_base_config() {
        let config = config_from(&[("TACTICS_MOVE_BUDGET", "3")]);
        let base = PlanningConfig::new()
            .with_move_budget(10)
            .with_move_profile(MoveProfile::Mage);

        let merged = config.planning_overrides.apply(base);
        assert_eq!(merged.move_budget, 3);
        assert_eq!(merged.move_profile, MoveProfile::Mage);
    }

    #[test]
    fn script_skips_unknown_commands() {
        let config = config_from(&[("TACTICS_SCRIPT", "a, up,UP ,jump,,a")]);
        assert_eq!(
            config.script,
            Some(vec![Command::A, Command::Up, Command::Up, Command::A])
        );
    }

    #[test]
    fn blank_session_id_is_ignored() {
        assert_eq!(config_from(&[("TACTICS_SESSION_ID", "  ")]).session_id, None);
        assert_eq!(
            config_from(&[("TACTICS_SESSION_ID", "demo")]).session_id.as_deref(),
            Some("demo")
        );
    }
}
