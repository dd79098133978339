mod build;
mod clean;
mod serve;

pub use build::handle_build_command;
pub use clean::handle_clean_command;
pub use serve::handle_serve_command;
