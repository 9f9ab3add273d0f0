//! Terminal client entry point.
use anyhow::Result;
use tactics_cli::{CliApp, CliConfig, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    CliApp::builder(config).build()?.run()
}
