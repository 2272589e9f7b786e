//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Site Settings - assemble and validate web application settings
#[derive(Parser, Debug)]
#[command(name = "site-settings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override file path (defaults to .env under the base directory)
    #[arg(short, long, global = true, env = "ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Base directory for templates, static, media and sqlite paths
    #[arg(short, long, global = true, default_value = ".", env = "BASE_DIR")]
    pub base_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble settings and exit non-zero on any error
    Check,

    /// Print the assembled settings as JSON (secrets omitted)
    Show(ShowArgs),
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print a single top-level section (e.g. "middleware", "logging")
    #[arg(short, long)]
    pub section: Option<String>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_section() {
        let cli = Cli::parse_from(["site-settings", "--base-dir", "/srv", "show", "-s", "cors"]);
        assert_eq!(cli.base_dir, PathBuf::from("/srv"));
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.section.as_deref(), Some("cors"));
                assert!(!args.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
