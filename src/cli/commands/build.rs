use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

use log::{error, info};

use crate::config::{load_config, SiteConfig};
use crate::site::build_site;

/// Handle the build command
pub async fn handle_build_command(
    config_file: Option<&Path>,
    strict: bool,
    watch: bool,
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
) {
    let config = match load_cli_config(config_file, strict, source, destination) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Building site from {}", config.source.display());
    match build_site(&config) {
        Ok(()) => info!("Site built at {}", config.destination.display()),
        Err(e) => {
            error!("Build failed: {}", e);
            std::process::exit(1);
        }
    }

    if watch {
        let (tx, rx) = channel();
        let watcher = match crate::server::watch_source(&config, tx) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!("Failed to watch {}: {}", config.source.display(), e);
                std::process::exit(1);
            }
        };
        crate::server::rebuild_loop(rx, &config);
        drop(watcher);
    }
}

/// Load the configuration and apply command-line overrides
pub fn load_cli_config(
    config_file: Option<&Path>,
    strict: bool,
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
) -> crate::utils::error::BoxResult<SiteConfig> {
    let source_dir = source.cloned().unwrap_or_else(|| PathBuf::from("."));
    let mut config = load_config(&source_dir, config_file, strict)?;
    if let Some(destination) = destination {
        config.destination = destination.clone();
    }
    Ok(config)
}
