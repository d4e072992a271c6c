use serde::Deserialize;
use std::env;

pub const DEFAULT_CARTESIA_API_URL: &str = "https://api.cartesia.ai";

/// The only provider API version accepted from callers and sent upstream
pub const CARTESIA_API_VERSION: &str = "2025-04-16";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Cartesia
    pub cartesia_api_url: String,
    pub cartesia_api_version: String,
    pub cartesia_timeout_ms: u64,
    pub cartesia_max_attempts: u32,
    pub cartesia_retry_base_delay_ms: u64,
    // Rate limiting
    pub rate_limit_enabled: bool,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    // CORS
    pub cors_allowed_origins: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            cartesia_api_url: DEFAULT_CARTESIA_API_URL.to_string(),
            cartesia_api_version: CARTESIA_API_VERSION.to_string(),
            cartesia_timeout_ms: 30_000,
            cartesia_max_attempts: 3,
            cartesia_retry_base_delay_ms: 1_000,
            rate_limit_enabled: true,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 15 * 60,
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let config = Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("NODE_ENV"))
                .map(|s| match s.to_lowercase().as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })
                .unwrap_or(defaults.environment),
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(defaults.log_format),
            cartesia_api_url: env::var("CARTESIA_API_URL").unwrap_or(defaults.cartesia_api_url),
            cartesia_api_version: env::var("CARTESIA_API_VERSION")
                .unwrap_or(defaults.cartesia_api_version),
            cartesia_timeout_ms: parse_var("CARTESIA_TIMEOUT_MS", defaults.cartesia_timeout_ms)?,
            cartesia_max_attempts: parse_var(
                "CARTESIA_MAX_ATTEMPTS",
                defaults.cartesia_max_attempts,
            )?,
            cartesia_retry_base_delay_ms: parse_var(
                "CARTESIA_RETRY_BASE_DELAY_MS",
                defaults.cartesia_retry_base_delay_ms,
            )?,
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(defaults.rate_limit_enabled),
            rate_limit_max_requests: parse_var(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            rate_limit_window_secs: parse_var(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
        };

        if config.cartesia_max_attempts == 0 {
            return Err("CARTESIA_MAX_ATTEMPTS must be at least 1".into());
        }
        if config.rate_limit_max_requests == 0 {
            return Err("RATE_LIMIT_MAX_REQUESTS must be at least 1".into());
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid value for {}: {}", name, e).into()),
        Err(_) => Ok(default),
    }
}
