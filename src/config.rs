//! Configuration types, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "./data/leads.db";
const DEFAULT_AT_USERNAME: &str = "sandbox";

const SANDBOX_BASE_URL: &str = "https://api.sandbox.africastalking.com";
const LIVE_BASE_URL: &str = "https://api.africastalking.com";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// libSQL database file.
    pub db_path: String,
    /// Outbound SMS gateway settings.
    pub gateway: GatewayConfig,
}

/// Africa's Talking credentials and endpoint.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub username: String,
    pub api_key: SecretString,
    /// Short code or alphanumeric sender ID. `None` uses the account default.
    pub sender_id: Option<String>,
    pub base_url: String,
}

impl GatewayConfig {
    /// `sandbox` talks to the sandbox host, any other username to production.
    pub fn default_base_url(username: &str) -> &'static str {
        if username == DEFAULT_AT_USERNAME {
            SANDBOX_BASE_URL
        } else {
            LIVE_BASE_URL
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("LEAD_SMS_PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "LEAD_SMS_PORT".to_string(),
                message: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let db_path = lookup("LEAD_SMS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let username = lookup("AT_USERNAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AT_USERNAME.to_string());

        let api_key = lookup("AT_API_KEY")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("AT_API_KEY".to_string()))?;

        let sender_id = lookup("AT_SENDER_ID").filter(|s| !s.trim().is_empty());

        let base_url = lookup("AT_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| GatewayConfig::default_base_url(&username).to_string());

        Ok(Self {
            port,
            db_path,
            gateway: GatewayConfig {
                username,
                api_key: SecretString::from(api_key),
                sender_id,
                base_url,
            },
        })
    }
}
