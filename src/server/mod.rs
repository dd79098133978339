use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use axum::Router;
use log::{debug, error, info};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::site::{assembler, build_site};
use crate::utils::error::BoxResult;

/// Pause after a change event so one save produces one rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Build once, then serve the destination over HTTP while rebuilding on
/// source changes.
///
/// Rebuild failures are logged and the previous output stays up; the
/// atomic output swap means a request never sees a half-written tree.
pub async fn serve(config: SiteConfig, host: &str, port: u16) -> BoxResult<()> {
    info!("Building site before serving");
    if let Err(e) = build_site(&config) {
        error!("Initial build failed: {}", e);
    }

    let (tx, rx) = channel();
    let _watcher = watch_source(&config, tx)?;
    let rebuild_config = config.clone();
    std::thread::spawn(move || rebuild_loop(rx, &rebuild_config));

    let app = Router::new()
        .fallback_service(ServeDir::new(&config.destination))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Serving {} at http://{}",
        config.destination.display(),
        addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Watch the source tree, forwarding relevant change events.
///
/// The watcher must stay alive for the duration of the server, so it is
/// returned to the caller.
pub fn watch_source(config: &SiteConfig, tx: Sender<Event>) -> BoxResult<RecommendedWatcher> {
    let destination = config.destination.clone();
    let staging = assembler::staging_path(&config.destination);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        match res {
            Ok(event) => {
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                // Output writes would otherwise retrigger the rebuild
                if event
                    .paths
                    .iter()
                    .all(|p| is_output_path(p, &destination, &staging))
                {
                    return;
                }
                if let Err(e) = tx.send(event) {
                    error!("Failed to forward file event: {}", e);
                }
            }
            Err(e) => error!("Watch error: {}", e),
        }
    })?;

    watcher.watch(&config.source, RecursiveMode::Recursive)?;
    info!("Watching {} for changes", config.source.display());
    Ok(watcher)
}

fn is_output_path(path: &Path, destination: &PathBuf, staging: &PathBuf) -> bool {
    path.starts_with(destination) || path.starts_with(staging)
}

/// Debounced rebuild loop; runs until the event channel closes
pub fn rebuild_loop(rx: Receiver<Event>, config: &SiteConfig) {
    while let Ok(event) = rx.recv() {
        debug!("File event: {:?}", event);
        std::thread::sleep(DEBOUNCE);
        // Collapse the burst of events one save tends to produce
        while rx.try_recv().is_ok() {}

        info!("Change detected, rebuilding");
        match build_site(config) {
            Ok(()) => info!("Rebuild complete"),
            Err(e) => error!("Rebuild failed, keeping previous output: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_are_ignored() {
        let destination = PathBuf::from("/src/site");
        let staging = PathBuf::from("/src/site.staging");
        assert!(is_output_path(
            Path::new("/src/site/index.html"),
            &destination,
            &staging
        ));
        assert!(is_output_path(
            Path::new("/src/site.staging/index.html"),
            &destination,
            &staging
        ));
        assert!(!is_output_path(
            Path::new("/src/posts/2024-01-01-a.md"),
            &destination,
            &staging
        ));
    }
}
