//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If OAuth credentials are absent there, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With neither source available, starts from defaults plus whatever
//!    environment overrides are set
//!
//! ## Environment Variables
//! - `CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_URI`: OAuth client registration
//! - `ENVIRONMENT`: environment label (default `production`)
//! - `QBO_AUTH_URL`, `QBO_TOKEN_URL`: OAuth endpoints
//! - `QBO_BASE_URL`: accounting REST base URL
//! - `APP_FOUNDATIONS_GRAPHQL_URL`: custom field GraphQL endpoint
//! - `QBO_MINOR_VERSION`: REST `minorversion` query value
//! - `QBO_HTTP_TIMEOUT_SECS`: upstream request timeout
//! - `QBO_BIND_ADDR`: HTTP listen address
//! - `QBO_PAGES_DIR`: static page directory
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./qbo-bridge.json` or `./qbo-bridge.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use qbo_bridge_domain::{BridgeError, Config, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `BridgeError::Config` if a variable or file that is present
/// cannot be parsed.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::warn!(
                        "No config file found; using defaults and environment overrides"
                    );
                    apply_overrides(Config::default(), env_lookup)
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `CLIENT_ID` must be set; every other variable falls back to its default.
///
/// # Errors
/// Returns `BridgeError::Config` if `CLIENT_ID` is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    from_lookup(env_lookup)
}

/// Build configuration from an arbitrary variable source.
pub(crate) fn from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("CLIENT_ID").is_none() {
        return Err(BridgeError::Config(
            "Missing required environment variable: CLIENT_ID".to_string(),
        ));
    }

    apply_overrides(Config::default(), lookup)
}

fn apply_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("CLIENT_ID") {
        config.oauth.client_id = Some(value);
    }
    if let Some(value) = lookup("CLIENT_SECRET") {
        config.oauth.client_secret = Some(value);
    }
    if let Some(value) = lookup("REDIRECT_URI") {
        config.oauth.redirect_uri = Some(value);
    }
    if let Some(value) = lookup("ENVIRONMENT") {
        config.oauth.environment = value;
    }
    if let Some(value) = lookup("QBO_AUTH_URL") {
        config.oauth.authorization_endpoint = value;
    }
    if let Some(value) = lookup("QBO_TOKEN_URL") {
        config.oauth.token_endpoint = value;
    }
    if let Some(value) = lookup("QBO_BASE_URL") {
        config.accounting.rest_base_url = value;
    }
    if let Some(value) = lookup("APP_FOUNDATIONS_GRAPHQL_URL") {
        config.accounting.graphql_url = value;
    }
    if let Some(value) = lookup("QBO_MINOR_VERSION") {
        config.accounting.minor_version = value.parse::<u32>().map_err(|e| {
            BridgeError::Config(format!("Invalid QBO_MINOR_VERSION: {}", e))
        })?;
    }
    if let Some(value) = lookup("QBO_HTTP_TIMEOUT_SECS") {
        config.accounting.timeout_seconds = value.parse::<u64>().map_err(|e| {
            BridgeError::Config(format!("Invalid QBO_HTTP_TIMEOUT_SECS: {}", e))
        })?;
    }
    if let Some(value) = lookup("QBO_BIND_ADDR") {
        config.server.bind_addr = value;
    }
    if let Some(value) = lookup("QBO_PAGES_DIR") {
        config.server.pages_dir = value;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BridgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BridgeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BridgeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BridgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(config_candidates(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(config_candidates(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn config_candidates(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("qbo-bridge.json"),
        dir.join("qbo-bridge.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
    ]
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_all_vars_set() {
        let config = from_lookup(vars(&[
            ("CLIENT_ID", "client"),
            ("CLIENT_SECRET", "secret"),
            ("REDIRECT_URI", "http://localhost:8080/api/auth/callback"),
            ("ENVIRONMENT", "sandbox"),
            ("QBO_BASE_URL", "https://sandbox-quickbooks.api.intuit.com"),
            ("QBO_MINOR_VERSION", "70"),
            ("QBO_HTTP_TIMEOUT_SECS", "5"),
            ("QBO_BIND_ADDR", "127.0.0.1:3000"),
        ]))
        .unwrap();

        assert_eq!(config.oauth.client_id.as_deref(), Some("client"));
        assert_eq!(config.oauth.client_secret.as_deref(), Some("secret"));
        assert_eq!(config.oauth.environment, "sandbox");
        assert_eq!(config.accounting.rest_base_url, "https://sandbox-quickbooks.api.intuit.com");
        assert_eq!(config.accounting.minor_version, 70);
        assert_eq!(config.accounting.timeout_seconds, 5);
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.accounting.graphql_url, Config::default().accounting.graphql_url);
    }

    #[test]
    fn test_from_lookup_missing_client_id() {
        let err = from_lookup(vars(&[("REDIRECT_URI", "http://localhost")])).unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let err =
            from_lookup(vars(&[("CLIENT_ID", "client"), ("QBO_MINOR_VERSION", "seventy")]))
                .unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("QBO_MINOR_VERSION")));
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "oauth": {"client_id": "file-client", "redirect_uri": "http://localhost/cb"},
            "accounting": {"minor_version": 65}
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.oauth.client_id.as_deref(), Some("file-client"));
        assert_eq!(config.accounting.minor_version, 65);
        assert_eq!(config.server.bind_addr, Config::default().server.bind_addr);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_missing() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/qbo-bridge.toml"))).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("not found")));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_config("", Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("yaml")));
    }
}
