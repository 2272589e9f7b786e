//! Settings constants
//!
//! Environment keys, defaults, and the fixed component identifiers the
//! framework runtime expects. Order of every list here is load-bearing.

// =============================================================================
// Environment Keys
// =============================================================================

pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
pub const ENV_ALLOWED_HOSTS: &str = "ALLOWED_HOSTS";
pub const ENV_WEBSITE_URL: &str = "WEBSITE_URL";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_TIME_ZONE: &str = "TIME_ZONE";
pub const ENV_LANGUAGE_CODE: &str = "LANGUAGE_CODE";
pub const ENV_HSTS_SECONDS: &str = "SECURE_HSTS_SECONDS";
pub const ENV_LOG_FILE: &str = "LOG_FILE";

/// Default override file name, looked up relative to the base directory
pub const DEFAULT_OVERRIDE_FILE: &str = ".env";

// =============================================================================
// Core
// =============================================================================

/// Secret keys shorter than this are accepted but logged as weak
pub const MIN_SECRET_KEY_LENGTH: usize = 50;

pub const SITE_ID: u32 = 1;
pub const ROOT_URLCONF: &str = "core.urls";
pub const WSGI_APPLICATION: &str = "core.wsgi.application";
pub const DEFAULT_AUTO_FIELD: &str = "django.db.models.BigAutoField";

// =============================================================================
// Installed Applications
// =============================================================================

pub const FRAMEWORK_APPS: &[&str] = &[
    "django.contrib.admin",
    "django.contrib.auth",
    "django.contrib.contenttypes",
    "django.contrib.sessions",
    "django.contrib.messages",
    "django.contrib.staticfiles",
];

pub const EXTERNAL_APPS: &[&str] = &["corsheaders"];

pub const LOCAL_APPS: &[&str] = &["app.apps.AppConfig"];

// =============================================================================
// Middleware
// =============================================================================

/// Request passes through these top to bottom; the response bottom to top.
pub const MIDDLEWARE: &[&str] = &[
    "django.middleware.security.SecurityMiddleware",
    "whitenoise.middleware.WhiteNoiseMiddleware",
    "django.contrib.sessions.middleware.SessionMiddleware",
    "corsheaders.middleware.CorsMiddleware",
    "django.middleware.common.CommonMiddleware",
    "django.middleware.csrf.CsrfViewMiddleware",
    "django.contrib.auth.middleware.AuthenticationMiddleware",
    "django.contrib.messages.middleware.MessageMiddleware",
    "django.middleware.clickjacking.XFrameOptionsMiddleware",
];

// =============================================================================
// CORS & CSRF
// =============================================================================

pub const CORS_ALLOW_HEADERS: &[&str] = &[
    "accept",
    "accept-encoding",
    "authorization",
    "content-type",
    "dnt",
    "origin",
    "user-agent",
    "x-csrftoken",
    "x-requested-with",
];

/// Local development origins appended after the site origins
pub const LOCAL_DEV_ORIGINS: &[&str] = &["http://localhost:8000", "http://127.0.0.1:8000"];

// =============================================================================
// Security Headers
// =============================================================================

pub const DEFAULT_HSTS_SECONDS: u64 = 3600;

// =============================================================================
// Templates
// =============================================================================

pub const TEMPLATE_BACKEND: &str = "django.template.backends.django.DjangoTemplates";
pub const TEMPLATES_DIR: &str = "templates";

pub const TEMPLATE_CONTEXT_PROCESSORS: &[&str] = &[
    "django.template.context_processors.debug",
    "django.template.context_processors.request",
    "django.contrib.auth.context_processors.auth",
    "django.contrib.messages.context_processors.messages",
];

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DATABASE_ALIAS: &str = "default";
pub const SQLITE_ENGINE: &str = "django.db.backends.sqlite3";
pub const SQLITE_FILE_NAME: &str = "db.sqlite3";

// =============================================================================
// Password Validation
// =============================================================================

pub const PASSWORD_VALIDATORS: &[&str] = &[
    "django.contrib.auth.password_validation.UserAttributeSimilarityValidator",
    "django.contrib.auth.password_validation.MinimumLengthValidator",
    "django.contrib.auth.password_validation.CommonPasswordValidator",
    "django.contrib.auth.password_validation.NumericPasswordValidator",
];

// =============================================================================
// Internationalization
// =============================================================================

pub const DEFAULT_LANGUAGE_CODE: &str = "en-us";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Tashkent";

// =============================================================================
// Static & Media Files
// =============================================================================

pub const STATIC_ROOT_DIR: &str = "staticfiles";
pub const STATIC_URL: &str = "/static/";
pub const STATIC_SOURCE_DIR: &str = "static";
pub const MEDIA_ROOT_DIR: &str = "media";
pub const MEDIA_URL: &str = "/media/";
pub const STATICFILES_STORAGE: &str = "whitenoise.storage.CompressedManifestStaticFilesStorage";

// =============================================================================
// Logging
// =============================================================================

pub const LOGGING_VERSION: u32 = 1;
pub const DEFAULT_LOG_FILE: &str = "server.log";

pub const FILTER_REQUIRE_DEBUG_FALSE: &str = "require_debug_false";
pub const FILTER_REQUIRE_DEBUG_TRUE: &str = "require_debug_true";

pub const FORMATTER_SERVER: &str = "django.server";
pub const FORMATTER_CLASS_SERVER: &str = "django.utils.log.ServerFormatter";
pub const SERVER_FORMAT: &str = "[%(server_time)s] %(message)s";

pub const HANDLER_CONSOLE: &str = "console";
pub const HANDLER_CONSOLE_DEBUG_FALSE: &str = "console_debug_false";
pub const HANDLER_SERVER: &str = "django.server";
pub const HANDLER_MAIL_ADMINS: &str = "mail_admins";
pub const HANDLER_LOGFILE: &str = "logfile";

pub const LOGGER_FRAMEWORK: &str = "django";
pub const LOGGER_SERVER: &str = "django.server";
