pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;

/// Run the command-line interface
pub async fn run() {
    let cli = types::Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Some(types::Commands::Build {
            config,
            strict,
            watch,
        }) => {
            commands::handle_build_command(
                config.as_deref(),
                *strict,
                *watch,
                cli.source.as_ref(),
                cli.destination.as_ref(),
            )
            .await;
        }
        Some(types::Commands::Serve { config, host, port }) => {
            commands::handle_serve_command(
                config.as_deref(),
                host,
                *port,
                cli.source.as_ref(),
                cli.destination.as_ref(),
            )
            .await;
        }
        Some(types::Commands::Clean {}) => {
            commands::handle_clean_command(cli.source.as_ref(), cli.destination.as_ref());
        }
        None => {
            // Default to a plain build
            commands::handle_build_command(
                None,
                false,
                false,
                cli.source.as_ref(),
                cli.destination.as_ref(),
            )
            .await;
        }
    }
}
