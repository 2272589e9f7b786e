//! Environment source - ordered key/value providers with first-match-wins lookup.
//!
//! The process environment is consulted first, then the optional override
//! file. A provider that defines a key shadows every provider after it, even
//! when the value is blank; this mirrors dotenv, which never overrides a
//! variable that already exists.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::{ConfigError, ConfigResult};

/// A single source of environment values.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait EnvProvider {
    /// Provider label used in diagnostics
    fn name(&self) -> String;

    /// Look up a raw value
    fn get(&self, key: &str) -> Option<String>;
}

/// Whether a key must be present, and what it falls back to otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    Required,
    Optional(&'a str),
}

// =============================================================================
// Providers
// =============================================================================

/// Reads the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn name(&self) -> String {
        "process environment".to_string()
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Values parsed from a `KEY=VALUE` override file.
///
/// Parsed into memory; the real process environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl OverrideFile {
    /// Load an override file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns `MalformedOverrideFile` if the file exists but cannot be read
    /// or contains a line that does not parse.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Option<Self>> {
        let path = path.as_ref();
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.display(), "No override file found");
                return Ok(None);
            }
            Err(e) => return Err(ConfigError::malformed(path, e.to_string())),
        };

        let mut values = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| ConfigError::malformed(path, e.to_string()))?;
            values.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "Override file loaded");
        Ok(Some(Self {
            path: path.to_path_buf(),
            values,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EnvProvider for OverrideFile {
    fn name(&self) -> String {
        format!("override file {}", self.path.display())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// In-memory provider for embedding callers and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    values: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvProvider for MapEnv {
    fn name(&self) -> String {
        "in-memory map".to_string()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// =============================================================================
// Environment Source
// =============================================================================

/// Ordered list of providers, queried in registration order.
#[derive(Default)]
pub struct EnvironmentSource {
    providers: Vec<Box<dyn EnvProvider>>,
}

impl std::fmt::Debug for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("EnvironmentSource")
            .field("providers", &names)
            .finish()
    }
}

impl EnvironmentSource {
    /// Create a source with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider with lower precedence than those already added.
    pub fn with_provider(mut self, provider: impl EnvProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Prime the standard source: process environment, then the override file
    /// at `override_path` if it exists.
    ///
    /// This is the only I/O performed during assembly.
    pub fn from_process(override_path: Option<&Path>) -> ConfigResult<Self> {
        let mut source = Self::new().with_provider(ProcessEnv);
        if let Some(path) = override_path {
            if let Some(file) = OverrideFile::load(path)? {
                source = source.with_provider(file);
            }
        }
        Ok(source)
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First value defined for `key`, in precedence order.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.providers.iter().find_map(|provider| {
            let value = provider.get(key)?;
            tracing::trace!(key, provider = %provider.name(), "Key resolved");
            Some(value)
        })
    }

    /// Resolve a key, treating blank values as absent.
    ///
    /// Values are returned trimmed, so derived settings all see the same text.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` naming the key if it is required and
    /// absent or blank in every provider.
    pub fn resolve(&self, key: &str, requirement: Requirement<'_>) -> ConfigResult<String> {
        let value = self
            .lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        match (value, requirement) {
            (Some(value), _) => Ok(value),
            (None, Requirement::Required) => Err(ConfigError::missing(key)),
            (None, Requirement::Optional(default)) => Ok(default.to_string()),
        }
    }

    /// Resolve a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
    pub fn resolve_bool(&self, key: &str, default: bool) -> ConfigResult<bool> {
        let raw = self.resolve(key, Requirement::Optional(""))?;
        if raw.is_empty() {
            return Ok(default);
        }
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(key, raw, "a boolean")),
        }
    }

    /// Resolve an unsigned integer.
    pub fn resolve_u64(&self, key: &str, default: u64) -> ConfigResult<u64> {
        let raw = self.resolve(key, Requirement::Optional(""))?;
        if raw.is_empty() {
            return Ok(default);
        }
        raw.parse()
            .map_err(|_| ConfigError::invalid(key, raw, "an unsigned integer"))
    }

    /// Resolve a comma-separated list; entries are trimmed and blanks dropped.
    pub fn resolve_list(&self, key: &str) -> ConfigResult<Vec<String>> {
        let raw = self.resolve(key, Requirement::Optional(""))?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn source(pairs: &[(&str, &str)]) -> EnvironmentSource {
        EnvironmentSource::new().with_provider(pairs.iter().copied().collect::<MapEnv>())
    }

    #[test]
    fn test_required_missing_names_key() {
        let err = source(&[]).resolve("SECRET_KEY", Requirement::Required).unwrap_err();
        match err {
            ConfigError::MissingConfiguration { key } => assert_eq!(key, "SECRET_KEY"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_required_blank_is_missing() {
        let result = source(&[("SECRET_KEY", "   ")]).resolve("SECRET_KEY", Requirement::Required);
        assert!(matches!(result, Err(ConfigError::MissingConfiguration { .. })));
    }

    #[test]
    fn test_resolved_value_is_trimmed() {
        let value = source(&[("WEBSITE_URL", " example.com \n")])
            .resolve("WEBSITE_URL", Requirement::Optional(""))
            .unwrap();
        assert_eq!(value, "example.com");
    }

    #[test]
    fn test_optional_missing_uses_default() {
        let value = source(&[]).resolve("TIME_ZONE", Requirement::Optional("UTC")).unwrap();
        assert_eq!(value, "UTC");

        let empty = source(&[]).resolve("WEBSITE_URL", Requirement::Optional("")).unwrap();
        assert_eq!(empty, "");
    }

    #[test]
    fn test_first_provider_wins() {
        let mut first = MockEnvProvider::new();
        first
            .expect_get()
            .with(eq("SECRET_KEY"))
            .times(1)
            .returning(|_| Some("from-process".to_string()));
        first.expect_name().return_const("first".to_string());

        let mut second = MockEnvProvider::new();
        second.expect_get().times(0);
        second.expect_name().return_const("second".to_string());

        let env = EnvironmentSource::new()
            .with_provider(first)
            .with_provider(second);

        assert_eq!(
            env.resolve("SECRET_KEY", Requirement::Required).unwrap(),
            "from-process"
        );
    }

    #[test]
    fn test_falls_through_to_later_provider() {
        let env = EnvironmentSource::new()
            .with_provider(MapEnv::new())
            .with_provider(MapEnv::new().set("WEBSITE_URL", "example.com"));

        assert_eq!(env.lookup("WEBSITE_URL").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_blank_value_shadows_later_provider() {
        let env = EnvironmentSource::new()
            .with_provider(MapEnv::new().set("TIME_ZONE", ""))
            .with_provider(MapEnv::new().set("TIME_ZONE", "UTC"));

        let value = env.resolve("TIME_ZONE", Requirement::Optional("Asia/Tashkent")).unwrap();
        assert_eq!(value, "Asia/Tashkent");
    }

    #[test]
    fn test_resolve_bool() {
        let env = source(&[("A", "Yes"), ("B", "0"), ("C", "maybe")]);
        assert!(env.resolve_bool("A", false).unwrap());
        assert!(!env.resolve_bool("B", true).unwrap());
        assert!(env.resolve_bool("MISSING", true).unwrap());
        assert!(matches!(
            env.resolve_bool("C", false),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_resolve_u64() {
        let env = source(&[("HSTS", " 60 "), ("BAD", "-1")]);
        assert_eq!(env.resolve_u64("HSTS", 3600).unwrap(), 60);
        assert_eq!(env.resolve_u64("MISSING", 3600).unwrap(), 3600);
        assert!(env.resolve_u64("BAD", 0).is_err());
    }

    #[test]
    fn test_resolve_list_drops_blank_entries() {
        let env = source(&[("ALLOWED_HOSTS", "example.com, www.example.com,,")]);
        assert_eq!(
            env.resolve_list("ALLOWED_HOSTS").unwrap(),
            vec!["example.com", "www.example.com"]
        );
        assert!(env.resolve_list("MISSING").unwrap().is_empty());
    }

    #[test]
    fn test_override_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = OverrideFile::load(dir.path().join(".env")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_override_file_parses_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# comment\nSECRET_KEY=abc\nWEBSITE_URL=\"example.com\"\n").unwrap();

        let file = OverrideFile::load(&path).unwrap().unwrap();
        assert_eq!(file.len(), 2);
        assert_eq!(file.get("WEBSITE_URL").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_override_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT A VALID LINE\n").unwrap();

        let err = OverrideFile::load(&path).unwrap_err();
        assert_eq!(err.code(), "MALFORMED_OVERRIDE_FILE");
    }
}
