//! Check command - Reports a summary of successfully assembled settings.

use crate::config::ConfigurationDocument;
use crate::errors::ConfigResult;

/// Execute the check command
pub fn execute(settings: &ConfigurationDocument) -> ConfigResult<()> {
    tracing::info!(
        site_host = %settings.site_host,
        allowed_hosts = settings.allowed_hosts.len(),
        trusted_origins = ?settings.csrf.trusted_origins,
        "Settings OK"
    );
    println!("{}", summary(settings));
    Ok(())
}

/// One-line human-readable summary.
pub fn summary(settings: &ConfigurationDocument) -> String {
    format!(
        "settings ok: {} apps, {} middleware, {} loggers, debug={}",
        settings.installed_apps.len(),
        settings.middleware.len(),
        settings.logging.loggers.len(),
        settings.debug
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Assembler, EnvironmentSource, MapEnv};

    #[test]
    fn test_summary() {
        let settings = Assembler::new(
            EnvironmentSource::new().with_provider(MapEnv::new().set("SECRET_KEY", "k")),
        )
        .assemble()
        .unwrap();

        assert_eq!(
            summary(&settings),
            "settings ok: 8 apps, 9 middleware, 2 loggers, debug=false"
        );
    }
}
