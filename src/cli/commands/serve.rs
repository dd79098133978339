use std::path::{Path, PathBuf};

use log::error;

use crate::cli::commands::build::load_cli_config;
use crate::server;

/// Handle the serve command
pub async fn handle_serve_command(
    config_file: Option<&Path>,
    host: &str,
    port: u16,
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
) {
    // Serving is a lenient-mode activity; strict builds belong in CI
    let config = match load_cli_config(config_file, false, source, destination) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(config, host, port).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
