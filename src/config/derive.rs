//! Values derived from the resolved site host.
//!
//! Each rule is a pure function of its inputs and runs once, after the host
//! has been resolved. An empty host is not rejected: the derived origins are
//! well-formed strings but will never match a real request.

use super::constants::LOCAL_DEV_ORIGINS;

/// Trusted origins for the site host: `[https://{host}, http://{host}]`.
pub fn derive_trusted_origins(site_host: &str) -> Vec<String> {
    vec![format!("https://{site_host}"), format!("http://{site_host}")]
}

/// CORS allowed origins: the trusted origins followed by local development
/// origins.
pub fn derive_cors_origins(site_host: &str) -> Vec<String> {
    let mut origins = derive_trusted_origins(site_host);
    origins.extend(LOCAL_DEV_ORIGINS.iter().map(|o| o.to_string()));
    origins
}

/// Session cookie domain; `None` means host-only cookies.
pub fn derive_cookie_domain(site_host: &str) -> Option<String> {
    let host = site_host.trim();
    (!host.is_empty()).then(|| host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_origins_https_first() {
        assert_eq!(
            derive_trusted_origins("example.com"),
            vec!["https://example.com", "http://example.com"]
        );
    }

    #[test]
    fn test_trusted_origins_empty_host() {
        assert_eq!(derive_trusted_origins(""), vec!["https://", "http://"]);
    }

    #[test]
    fn test_cors_origins_append_local() {
        assert_eq!(
            derive_cors_origins("example.com"),
            vec![
                "https://example.com",
                "http://example.com",
                "http://localhost:8000",
                "http://127.0.0.1:8000",
            ]
        );
    }

    #[test]
    fn test_cookie_domain() {
        assert_eq!(derive_cookie_domain("example.com").as_deref(), Some("example.com"));
        assert_eq!(derive_cookie_domain(""), None);
        assert_eq!(derive_cookie_domain("  "), None);
    }
}
