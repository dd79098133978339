use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Initialize logging at the level implied by the global flags
pub fn init_logging(verbose: bool, quiet: bool) -> LevelFilter {
    let log_level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    let _ = SimpleLogger::new().with_level(log_level).init();

    log_level
}
