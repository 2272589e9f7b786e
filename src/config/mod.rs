//! Settings configuration module
//!
//! Loads environment values, derives dependent settings, and assembles the
//! immutable settings document handed to the framework runtime.

mod assembler;
mod chain;
mod constants;
mod derive;
mod logging;
mod settings;
mod source;

pub use assembler::{default_logging_topology, Assembler};
pub use chain::{build_ordered_chain, OrderedChain};
pub use constants::*;
pub use derive::{derive_cookie_domain, derive_cors_origins, derive_trusted_origins};
pub use logging::{
    build_logging_topology, FilterKind, FilterSpec, FormatterSpec, HandlerClass, HandlerSpec,
    LogLevel, LoggerSpec, LoggingTopology,
};
pub use settings::{
    ConfigurationDocument, CorsSettings, CsrfSettings, DatabaseConnection, I18nSettings,
    SecuritySettings, SessionSettings, StaticFilesSettings, TemplateBackend,
};
pub use source::{EnvProvider, EnvironmentSource, MapEnv, OverrideFile, ProcessEnv, Requirement};

#[cfg(any(test, feature = "test-utils"))]
pub use source::MockEnvProvider;
