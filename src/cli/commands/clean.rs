use std::path::PathBuf;

use log::{error, info};

use crate::cli::commands::build::load_cli_config;
use crate::site::assembler::staging_path;
use crate::utils::fs::remove_directory;

/// Handle the clean command
pub fn handle_clean_command(source: Option<&PathBuf>, destination: Option<&PathBuf>) {
    let config = match load_cli_config(None, false, source, destination) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    for dir in [&config.destination, &staging_path(&config.destination)] {
        if dir.exists() {
            match remove_directory(dir) {
                Ok(()) => info!("Removed {}", dir.display()),
                Err(e) => {
                    error!("Failed to remove {}: {}", dir.display(), e);
                    std::process::exit(1);
                }
            }
        }
    }
}
