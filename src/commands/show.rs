//! Show command - Prints assembled settings as JSON.
//!
//! The secret key and database URLs are never serialized.

use crate::cli::args::ShowArgs;
use crate::config::ConfigurationDocument;
use crate::errors::{ConfigError, ConfigResult};

/// Execute the show command
pub fn execute(args: ShowArgs, settings: &ConfigurationDocument) -> ConfigResult<()> {
    println!("{}", render(&args, settings)?);
    Ok(())
}

/// Render the document, or one top-level section of it.
pub fn render(args: &ShowArgs, settings: &ConfigurationDocument) -> ConfigResult<String> {
    let mut value = serde_json::to_value(settings)?;

    if let Some(section) = &args.section {
        value = value
            .get_mut(section)
            .map(serde_json::Value::take)
            .ok_or_else(|| ConfigError::UnknownSection(section.clone()))?;
    }

    let rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Assembler, EnvironmentSource, MapEnv};

    fn settings() -> ConfigurationDocument {
        Assembler::new(
            EnvironmentSource::new().with_provider(
                MapEnv::new()
                    .set("SECRET_KEY", "super-secret-value")
                    .set("WEBSITE_URL", "example.com")
                    .set("DATABASE_URL", "postgres://admin:hunter2@db/site"),
            ),
        )
        .assemble()
        .unwrap()
    }

    #[test]
    fn test_render_omits_secrets() {
        let args = ShowArgs {
            section: None,
            compact: true,
        };
        let json = render(&args, &settings()).unwrap();

        assert!(!json.contains("super-secret-value"));
        assert!(!json.contains("hunter2"));
        assert!(json.contains("https://example.com"));
    }

    #[test]
    fn test_render_section() {
        let args = ShowArgs {
            section: Some("csrf".to_string()),
            compact: true,
        };
        let json = render(&args, &settings()).unwrap();

        assert_eq!(
            json,
            r#"{"cookie_secure":true,"trusted_origins":["https://example.com","http://example.com"]}"#
        );
    }

    #[test]
    fn test_render_unknown_section() {
        let args = ShowArgs {
            section: Some("nope".to_string()),
            compact: false,
        };
        let err = render(&args, &settings()).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_SECTION");
    }
}
