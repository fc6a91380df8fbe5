// src/config.rs
// Startup configuration - single source of truth for all env vars

use crate::error::{Result, TallyError};
use std::path::PathBuf;

/// Remote service used when TALLY_BASE_URL is not set
pub const DEFAULT_BASE_URL: &str = "https://office.warpdevelopment.com";

const DB_FILE_NAME: &str = "timesheets.db";

/// Everything the process needs, validated once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Acting user's email (TALLY_EMAIL, required)
    pub email: String,
    /// Acting user's password (TALLY_PASSWORD, required)
    pub password: String,
    /// Base URL of the timesheet service (TALLY_BASE_URL)
    pub base_url: String,
    /// SQLite file holding cached credentials (TALLY_DB)
    pub db_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or empty TALLY_EMAIL / TALLY_PASSWORD is a `Config` error;
    /// the caller decides whether that is fatal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let email = require_var(lookup, "TALLY_EMAIL")?;
        let password = require_var(lookup, "TALLY_PASSWORD")?;

        let base_url = read_var(lookup, "TALLY_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let db_path = read_var(lookup, "TALLY_DB")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        Ok(Self {
            email,
            password,
            base_url,
            db_path,
        })
    }
}

fn require_var(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    read_var(lookup, name).ok_or_else(|| TallyError::Config(format!("{} is not set", name)))
}

/// Read a single variable, filtering empty values
fn read_var(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// The credential cache lives next to the executable, falling back to the
/// working directory when the executable path is unavailable
fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DB_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_loads_required_and_defaults() {
        let lookup = lookup_from(&[("TALLY_EMAIL", "a@b.com"), ("TALLY_PASSWORD", "hunter2")]);
        let config = Config::from_lookup(&lookup).unwrap();

        assert_eq!(config.email, "a@b.com");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.db_path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn test_missing_email_is_config_error() {
        let lookup = lookup_from(&[("TALLY_PASSWORD", "hunter2")]);
        let err = Config::from_lookup(&lookup).unwrap_err();

        assert!(matches!(err, TallyError::Config(_)));
        assert!(err.to_string().contains("TALLY_EMAIL"));
    }

    #[test]
    fn test_missing_password_is_config_error() {
        let lookup = lookup_from(&[("TALLY_EMAIL", "a@b.com")]);
        let err = Config::from_lookup(&lookup).unwrap_err();

        assert!(matches!(err, TallyError::Config(_)));
        assert!(err.to_string().contains("TALLY_PASSWORD"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let lookup = lookup_from(&[("TALLY_EMAIL", "   "), ("TALLY_PASSWORD", "hunter2")]);
        let err = Config::from_lookup(&lookup).unwrap_err();
        assert!(err.to_string().contains("TALLY_EMAIL"));
    }

    #[test]
    fn test_overrides() {
        let lookup = lookup_from(&[
            ("TALLY_EMAIL", "a@b.com"),
            ("TALLY_PASSWORD", "hunter2"),
            ("TALLY_BASE_URL", "https://timesheets.example.com/"),
            ("TALLY_DB", "/tmp/tally/cache.db"),
        ]);
        let config = Config::from_lookup(&lookup).unwrap();

        // Trailing slash is stripped so endpoint paths join cleanly
        assert_eq!(config.base_url, "https://timesheets.example.com");
        assert_eq!(config.db_path, PathBuf::from("/tmp/tally/cache.db"));
    }
}
