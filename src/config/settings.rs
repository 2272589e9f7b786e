//! The assembled settings document consumed by the framework runtime.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::chain::OrderedChain;
use super::logging::LoggingTopology;

/// Immutable settings document, created once per process start.
///
/// Owned data only; share it by reference (or `Arc`) with whatever consumes it.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationDocument {
    #[serde(skip_serializing)]
    pub(crate) secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub site_host: String,
    pub site_id: u32,
    pub root_urlconf: String,
    pub wsgi_application: String,
    pub default_auto_field: String,
    pub installed_apps: OrderedChain,
    pub middleware: OrderedChain,
    pub cors: CorsSettings,
    pub csrf: CsrfSettings,
    pub session: SessionSettings,
    pub security: SecuritySettings,
    pub templates: Vec<TemplateBackend>,
    pub databases: BTreeMap<String, DatabaseConnection>,
    pub password_validators: OrderedChain,
    pub i18n: I18nSettings,
    pub static_files: StaticFilesSettings,
    pub logging: LoggingTopology,
}

// Don't expose the secret key in debug output
impl std::fmt::Debug for ConfigurationDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationDocument")
            .field("secret_key", &"[REDACTED]")
            .field("debug", &self.debug)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("site_host", &self.site_host)
            .field("site_id", &self.site_id)
            .field("root_urlconf", &self.root_urlconf)
            .field("wsgi_application", &self.wsgi_application)
            .field("default_auto_field", &self.default_auto_field)
            .field("installed_apps", &self.installed_apps)
            .field("middleware", &self.middleware)
            .field("cors", &self.cors)
            .field("csrf", &self.csrf)
            .field("session", &self.session)
            .field("security", &self.security)
            .field("templates", &self.templates)
            .field("databases", &self.databases)
            .field("password_validators", &self.password_validators)
            .field("i18n", &self.i18n)
            .field("static_files", &self.static_files)
            .field("logging", &self.logging)
            .finish()
    }
}

impl ConfigurationDocument {
    /// Secret key bytes for signing.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Connection for the `default` database alias.
    pub fn default_database(&self) -> Option<&DatabaseConnection> {
        self.databases.get(super::constants::DEFAULT_DATABASE_ALIAS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    pub allow_all_origins: bool,
    pub allowed_origins: Vec<String>,
    pub allow_headers: OrderedChain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsrfSettings {
    pub trusted_origins: Vec<String>,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    /// `None` means host-only cookies
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuritySettings {
    pub browser_xss_filter: bool,
    pub hsts_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
    pub content_type_nosniff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateBackend {
    pub backend: String,
    pub dirs: Vec<PathBuf>,
    pub app_dirs: bool,
    pub context_processors: OrderedChain,
}

/// Database connection parameters, passed through uninterpreted.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseConnection {
    /// Connection URL taken verbatim from the environment
    Url {
        #[serde(skip_serializing)]
        url: String,
    },
    /// Local file database
    File { engine: String, name: PathBuf },
}

// URLs usually carry credentials
impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseConnection::Url { .. } => f
                .debug_struct("Url")
                .field("url", &"[REDACTED]")
                .finish(),
            DatabaseConnection::File { engine, name } => f
                .debug_struct("File")
                .field("engine", engine)
                .field("name", name)
                .finish(),
        }
    }
}

impl DatabaseConnection {
    /// The raw connection URL, if this connection came from one.
    pub fn url(&self) -> Option<&str> {
        match self {
            DatabaseConnection::Url { url } => Some(url.as_str()),
            DatabaseConnection::File { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18nSettings {
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_tz: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticFilesSettings {
    pub static_root: PathBuf,
    pub static_url: String,
    pub dirs: Vec<PathBuf>,
    pub media_root: PathBuf,
    pub media_url: String,
    pub storage: String,
}
