//! Site Settings - environment-driven settings assembly
//!
//! Builds the single, immutable settings document a web framework runtime
//! reads at process start: secret key, allowed hosts, trusted origins,
//! middleware and application chains, database connection, static paths and
//! the logging handler tree.
//!
//! # Layers
//!
//! - **config**: environment sources, derivation rules, ordered chains,
//!   logging topology and the assembler
//! - **errors**: fatal assembly errors
//! - **cli** / **commands**: the `site-settings` binary
//!
//! # Usage
//!
//! ```no_run
//! use site_settings::config::Assembler;
//!
//! let settings = Assembler::from_process(None, ".")?.assemble()?;
//! println!("{:?}", settings.csrf.trusted_origins);
//! # Ok::<(), site_settings::ConfigError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

// Re-export commonly used types at crate root
pub use config::{Assembler, ConfigurationDocument, EnvironmentSource};
pub use errors::{ConfigError, ConfigResult};
