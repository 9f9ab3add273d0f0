//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Map layouts: terrain and unit placement (data-driven via RON)
//! - Move cost overrides layered on the standard table (data-driven via TOML)
//! - Planning configuration (data-driven via TOML)
//!
//! All loaders use tactics-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadedMap, MapLoader, TablesLoader};

/// Built-in skirmish layout used when no map file is configured.
pub const SKIRMISH_MAP: &str = include_str!("../data/maps/skirmish.ron");
