//! Settings assembler - builds the `ConfigurationDocument` from an environment source.
//!
//! Assembly runs in dependency order:
//! 1. Base values resolved from the environment
//! 2. Values derived from the site host
//! 3. Ordered chains (installed apps, middleware, validators)
//! 4. Logging topology
//!
//! Any error aborts assembly; no partial document is ever returned.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::chain::build_ordered_chain;
use super::constants::*;
use super::derive::{derive_cookie_domain, derive_cors_origins, derive_trusted_origins};
use super::logging::{
    build_logging_topology, FilterKind, FilterSpec, FormatterSpec, HandlerClass, HandlerSpec,
    LogLevel, LoggerSpec, LoggingTopology,
};
use super::settings::{
    ConfigurationDocument, CorsSettings, CsrfSettings, DatabaseConnection, I18nSettings,
    SecuritySettings, SessionSettings, StaticFilesSettings, TemplateBackend,
};
use super::source::{EnvironmentSource, Requirement};
use crate::errors::ConfigResult;

/// Values read directly from the environment.
struct BaseValues {
    secret_key: String,
    debug: bool,
    allowed_hosts: Vec<String>,
    site_host: String,
    database_url: Option<String>,
    language_code: String,
    time_zone: String,
    hsts_seconds: u64,
    log_file: String,
}

/// Assembles settings from an environment source and a base directory.
#[derive(Debug)]
pub struct Assembler {
    source: EnvironmentSource,
    base_dir: PathBuf,
}

impl Assembler {
    pub fn new(source: EnvironmentSource) -> Self {
        Self {
            source,
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory that templates, static, media and sqlite paths hang off.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Prime the process environment plus an override file.
    ///
    /// With no explicit `env_file`, `.env` under `base_dir` is used if present.
    pub fn from_process(env_file: Option<&Path>, base_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let base_dir = base_dir.into();
        let env_file = env_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base_dir.join(DEFAULT_OVERRIDE_FILE));
        let source = EnvironmentSource::from_process(Some(env_file.as_path()))?;
        Ok(Self::new(source).base_dir(base_dir))
    }

    pub fn source(&self) -> &EnvironmentSource {
        &self.source
    }

    /// Assemble the settings document.
    ///
    /// # Errors
    /// - `MissingConfiguration` if `SECRET_KEY` is absent or blank
    /// - `InvalidValue` if a typed value does not parse
    /// - `DanglingReference` / `DuplicateLoggingNode` if the logging
    ///   topology is inconsistent
    pub fn assemble(&self) -> ConfigResult<ConfigurationDocument> {
        let base = self.resolve_base()?;

        // Derived values
        let trusted_origins = derive_trusted_origins(&base.site_host);
        let cors_origins = derive_cors_origins(&base.site_host);
        let cookie_domain = derive_cookie_domain(&base.site_host);
        if cookie_domain.is_none() {
            tracing::warn!(
                key = ENV_WEBSITE_URL,
                "Site host is empty; derived origins will not match any request"
            );
        }

        // Ordered chains
        let installed_apps = build_ordered_chain(FRAMEWORK_APPS.iter().copied())
            .concat(build_ordered_chain(EXTERNAL_APPS.iter().copied()))
            .concat(build_ordered_chain(LOCAL_APPS.iter().copied()));
        let middleware = build_ordered_chain(MIDDLEWARE.iter().copied());
        let password_validators = build_ordered_chain(PASSWORD_VALIDATORS.iter().copied());

        let logging = default_logging_topology(&base.log_file)?;

        let document = ConfigurationDocument {
            secret_key: base.secret_key,
            debug: base.debug,
            allowed_hosts: base.allowed_hosts,
            site_host: base.site_host,
            site_id: SITE_ID,
            root_urlconf: ROOT_URLCONF.to_string(),
            wsgi_application: WSGI_APPLICATION.to_string(),
            default_auto_field: DEFAULT_AUTO_FIELD.to_string(),
            installed_apps,
            middleware,
            cors: CorsSettings {
                allow_all_origins: true,
                allowed_origins: cors_origins,
                allow_headers: build_ordered_chain(CORS_ALLOW_HEADERS.iter().copied()),
            },
            csrf: CsrfSettings {
                trusted_origins,
                cookie_secure: true,
            },
            session: SessionSettings {
                cookie_domain,
                cookie_secure: true,
            },
            security: SecuritySettings {
                browser_xss_filter: true,
                hsts_seconds: base.hsts_seconds,
                hsts_include_subdomains: true,
                hsts_preload: true,
                content_type_nosniff: true,
            },
            templates: vec![self.template_backend()],
            databases: self.databases(base.database_url),
            password_validators,
            i18n: I18nSettings {
                language_code: base.language_code,
                time_zone: base.time_zone,
                use_i18n: true,
                use_tz: true,
            },
            static_files: self.static_files(),
            logging,
        };

        tracing::info!(
            apps = document.installed_apps.len(),
            middleware = document.middleware.len(),
            debug = document.debug,
            "Settings assembled"
        );
        Ok(document)
    }

    fn resolve_base(&self) -> ConfigResult<BaseValues> {
        let env = &self.source;

        let secret_key = env.resolve(ENV_SECRET_KEY, Requirement::Required)?;
        if is_weak_secret(&secret_key) {
            tracing::warn!(
                min_length = MIN_SECRET_KEY_LENGTH,
                "SECRET_KEY is shorter than recommended"
            );
        }

        let database_url = env.resolve(ENV_DATABASE_URL, Requirement::Optional(""))?;

        Ok(BaseValues {
            secret_key,
            debug: env.resolve_bool(ENV_DEBUG, false)?,
            allowed_hosts: env.resolve_list(ENV_ALLOWED_HOSTS)?,
            site_host: env.resolve(ENV_WEBSITE_URL, Requirement::Optional(""))?,
            database_url: (!database_url.is_empty()).then_some(database_url),
            language_code: env.resolve(ENV_LANGUAGE_CODE, Requirement::Optional(DEFAULT_LANGUAGE_CODE))?,
            time_zone: env.resolve(ENV_TIME_ZONE, Requirement::Optional(DEFAULT_TIME_ZONE))?,
            hsts_seconds: env.resolve_u64(ENV_HSTS_SECONDS, DEFAULT_HSTS_SECONDS)?,
            log_file: env.resolve(ENV_LOG_FILE, Requirement::Optional(DEFAULT_LOG_FILE))?,
        })
    }

    fn template_backend(&self) -> TemplateBackend {
        TemplateBackend {
            backend: TEMPLATE_BACKEND.to_string(),
            dirs: vec![self.base_dir.join(TEMPLATES_DIR)],
            app_dirs: true,
            context_processors: build_ordered_chain(TEMPLATE_CONTEXT_PROCESSORS.iter().copied()),
        }
    }

    fn databases(&self, url: Option<String>) -> BTreeMap<String, DatabaseConnection> {
        let connection = match url {
            Some(url) => DatabaseConnection::Url { url },
            None => DatabaseConnection::File {
                engine: SQLITE_ENGINE.to_string(),
                name: self.base_dir.join(SQLITE_FILE_NAME),
            },
        };
        BTreeMap::from([(DEFAULT_DATABASE_ALIAS.to_string(), connection)])
    }

    fn static_files(&self) -> StaticFilesSettings {
        StaticFilesSettings {
            static_root: self.base_dir.join(STATIC_ROOT_DIR),
            static_url: STATIC_URL.to_string(),
            dirs: vec![self.base_dir.join(STATIC_SOURCE_DIR)],
            media_root: self.base_dir.join(MEDIA_ROOT_DIR),
            media_url: MEDIA_URL.to_string(),
            storage: STATICFILES_STORAGE.to_string(),
        }
    }
}

/// Whether a secret key is shorter than the recommended number of characters.
fn is_weak_secret(secret_key: &str) -> bool {
    secret_key.chars().count() < MIN_SECRET_KEY_LENGTH
}

/// Standard handler tree: console output gated on the debug flag, error mail
/// to admins, a server access formatter and a log file.
pub fn default_logging_topology(log_file: &str) -> ConfigResult<LoggingTopology> {
    let filters = vec![
        FilterSpec::new(FILTER_REQUIRE_DEBUG_FALSE, FilterKind::RequireDebugFalse),
        FilterSpec::new(FILTER_REQUIRE_DEBUG_TRUE, FilterKind::RequireDebugTrue),
    ];

    let formatters =
        vec![FormatterSpec::new(FORMATTER_SERVER, SERVER_FORMAT).factory(FORMATTER_CLASS_SERVER)];

    let handlers = vec![
        HandlerSpec::new(HANDLER_CONSOLE, HandlerClass::Stream)
            .level(LogLevel::Info)
            .filter(FILTER_REQUIRE_DEBUG_TRUE),
        HandlerSpec::new(HANDLER_CONSOLE_DEBUG_FALSE, HandlerClass::Stream)
            .level(LogLevel::Error)
            .filter(FILTER_REQUIRE_DEBUG_FALSE),
        HandlerSpec::new(HANDLER_SERVER, HandlerClass::Stream)
            .level(LogLevel::Info)
            .formatter(FORMATTER_SERVER),
        HandlerSpec::new(HANDLER_MAIL_ADMINS, HandlerClass::AdminEmail)
            .level(LogLevel::Error)
            .filter(FILTER_REQUIRE_DEBUG_FALSE),
        HandlerSpec::new(
            HANDLER_LOGFILE,
            HandlerClass::File {
                filename: log_file.to_string(),
            },
        ),
    ];

    let loggers = vec![
        LoggerSpec::new(LOGGER_FRAMEWORK, LogLevel::Info)
            .handler(HANDLER_CONSOLE)
            .handler(HANDLER_CONSOLE_DEBUG_FALSE)
            .handler(HANDLER_LOGFILE),
        LoggerSpec::new(LOGGER_SERVER, LogLevel::Info)
            .handler(HANDLER_SERVER)
            .propagate(false),
    ];

    build_logging_topology(handlers, filters, formatters, loggers)
}
