use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "inkpress")]
#[command(about = "Markdown blog generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Destination directory (defaults to <source>/site)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub destination: Option<PathBuf>,

    /// Print verbose output
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Silence all output except errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build the site
    #[command(alias = "b")]
    Build {
        /// Custom configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Treat author errors as fatal, regardless of the config file
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Watch for changes and rebuild
        #[arg(short = 'w', long, default_value_t = false)]
        watch: bool,
    },

    /// Build, then serve the site locally and rebuild on changes
    #[command(alias = "s")]
    Serve {
        /// Custom configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short = 'P', long, default_value_t = 4000)]
        port: u16,
    },

    /// Remove the generated site
    Clean {},
}
