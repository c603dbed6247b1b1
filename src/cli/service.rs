//! Hosts the intake service from the CLI binary.

use booking_config::ConfigManager;
use tracing::info;

use crate::cli::core::CliError;

/// Serves the intake API until Ctrl-C. `addr` overrides `server.bind_addr`.
pub fn run_serve(addr: Option<&str>) -> Result<(), CliError> {
    let manager = ConfigManager::from_env()?;
    let config = manager.load()?;
    info!(config = %manager.config_path().display(), "starting intake service");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(booking_api::serve(&config, addr))?;
    Ok(())
}
