//! Site Settings - Application entry point
//!
//! Assembles settings once at start-up and dispatches to a command.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_settings::{
    cli::{Cli, Commands},
    commands,
    config::Assembler,
};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Assemble settings; any error aborts start-up
    let settings = match Assembler::from_process(cli.env_file.as_deref(), &cli.base_dir)
        .and_then(|assembler| assembler.assemble())
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(code = e.code(), "Settings assembly failed: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Settings assembled");

    // Execute command
    let result = match cli.command {
        Commands::Check => commands::check::execute(&settings),
        Commands::Show(args) => commands::show::execute(args, &settings),
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
