use std::sync::Arc;

use caisse_console::api::caisse::CaisseClient;
use caisse_console::commands::{self, Console};
use caisse_console::config::Config;
use caisse_console::services::Notifier;
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["caisse_console=debug", "reqwest=warn"] {
        match directive.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🏦 Starting caisse console v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };

    if config.api_token.is_none() {
        warn!("CAISSE_API_TOKEN not set, requests will be anonymous");
    }

    let token = config.api_token.as_deref();
    let client = match CaisseClient::new(&config.api_url, token, config.http_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };
    info!("Using backend at {}", client.base_url());

    let mut console = Console::new(client, Notifier::new(config.notification_timeout));

    // Load the cash registers up front, like the caisse page does on mount
    let welcome = console.handle_line("$caisses").await;
    println!("{}", commands::help::execute());
    if !welcome.output.is_empty() {
        println!("\n{}", welcome.output);
    }

    commands::run(&mut console, BufReader::new(tokio::io::stdin())).await;
    info!("Console closed");
}
