use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ichnome_front::cli;

#[derive(Debug, Parser)]
#[command(name = "ichnome-front")]
#[command(about = "Web front-end for the ichnome file tracking service")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the front-end over HTTP
    Serve {
        /// Listen address (default: server.address from config)
        #[arg(long)]
        address: Option<String>,
    },
    /// Render one front-end URL to stdout, e.g. `/main/stats/default`
    Render {
        url: String,
    },
    /// Check that the backend answers for a workspace
    Check {
        workspace: String,
    },
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.endpoint_url http://backend:3024`
    Set {
        key: String,
        value: String,
    },
}

fn main() -> Result<()> {
    let layer = fmt::layer().compact().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(layer).with(filter).init();

    let app = App::parse();

    match app.command {
        Commands::Serve { address } => cli::run_serve(address),
        Commands::Render { url } => cli::run_render(&url),
        Commands::Check { workspace } => cli::run_check(&workspace),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
        },
    }
}
