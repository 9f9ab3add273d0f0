//! Terminal client for the movement planner.
//!
//! Reads configuration from the environment, loads content through
//! `tactics-content`, and drives a [`Session`] either from the keyboard or
//! from a scripted command list.
pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod session;
pub mod terminal;

pub use app::{CliApp, CliAppBuilder, describe};
pub use config::{CliConfig, ContentConfig, InputConfig, PlanningOverrides};
pub use input::{InputDebouncer, KeyMapError, KeyMapper};
pub use session::{Session, SessionUpdate};
