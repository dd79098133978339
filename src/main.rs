// Module declarations
mod cli;
mod config;
mod content;
mod liquid;
mod markdown;
mod plugins;
mod server;
mod site;
mod taxonomy;
mod utils;

#[tokio::main]
async fn main() {
    cli::run().await;
}
