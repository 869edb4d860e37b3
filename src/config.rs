use std::env;

use crate::constants::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_PROFILE_NAME, DEFAULT_ADMIN_USERNAME,
    DEFAULT_PASSCODE_TTL_SECS,
};

/// Ledger configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file backing the blob slot; `None` keeps everything in memory
    pub storage_path: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_profile_name: String,
    /// Enables the peppered credential scheme when set
    pub password_pepper: Option<String>,
    pub passcode_ttl_secs: i64,
    /// Reveal the passcode when delivery fails
    pub passcode_demo_fallback: bool,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            admin_profile_name: DEFAULT_ADMIN_PROFILE_NAME.to_string(),
            password_pepper: None,
            passcode_ttl_secs: DEFAULT_PASSCODE_TTL_SECS,
            passcode_demo_fallback: true,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let storage_path = env::var("LEDGER_STORAGE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let admin_username =
            env::var("LEDGER_ADMIN_USERNAME").unwrap_or(defaults.admin_username);
        let admin_password =
            env::var("LEDGER_ADMIN_PASSWORD").unwrap_or(defaults.admin_password);
        let admin_profile_name =
            env::var("LEDGER_ADMIN_PROFILE_NAME").unwrap_or(defaults.admin_profile_name);

        let password_pepper = env::var("LEDGER_PASSWORD_PEPPER")
            .ok()
            .filter(|s| !s.is_empty());

        let passcode_ttl_secs = match env::var("LEDGER_PASSCODE_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or("Invalid LEDGER_PASSCODE_TTL_SECS")?,
            Err(_) => defaults.passcode_ttl_secs,
        };

        let passcode_demo_fallback = match env::var("LEDGER_PASSCODE_DEMO_FALLBACK") {
            Ok(raw) => parse_flag(&raw).ok_or("Invalid LEDGER_PASSCODE_DEMO_FALLBACK")?,
            Err(_) => defaults.passcode_demo_fallback,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        Ok(Config {
            storage_path,
            admin_username,
            admin_password,
            admin_profile_name,
            password_pepper,
            passcode_ttl_secs,
            passcode_demo_fallback,
            environment,
        })
    }

    /// Human readable description of where data lives
    pub fn storage_description(&self) -> String {
        match &self.storage_path {
            Some(path) => format!("file {}", path),
            None => "memory".to_string(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
