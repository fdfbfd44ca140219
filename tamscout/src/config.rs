use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.keywordseverywhere.com/v1";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Reads a non-blank string variable.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub tam: TamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// Keyword-metrics provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Environment-sourced API key. Takes precedence over a key saved in settings.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Maximum phrases per provider request.
    pub batch_size: usize,
    /// Pause between consecutive batch requests.
    pub batch_delay_ms: u64,
    /// Abort a fetch when the first returned record reports more monthly
    /// searches than this. `None` disables the check.
    pub suspicious_volume_threshold: Option<u64>,
    pub country: String,
    pub currency: String,
    pub data_source: String,
}

impl ProviderConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            timeout_secs: 30,
            batch_size: 250,
            batch_delay_ms: 500,
            suspicious_volume_threshold: Some(5000),
            country: "US".to_string(),
            currency: "USD".to_string(),
            data_source: "gkp".to_string(),
        }
    }
}

/// Market-sizing assumptions for the HVAC estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TamConfig {
    pub click_through_rate: f64,
    pub lead_conversion_rate: f64,
    pub close_rate: f64,
    pub average_ticket: f64,
}

impl Default for TamConfig {
    fn default() -> Self {
        Self {
            click_through_rate: 0.30,
            lead_conversion_rate: 0.10,
            close_rate: 0.40,
            average_ticket: 450.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let provider_defaults = ProviderConfig::default();
        let tam_defaults = TamConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("TAMSCOUT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("TAMSCOUT_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:tamscout.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            provider: ProviderConfig {
                api_key: env_non_empty("KEYWORDS_API_KEY"),
                base_url: env_non_empty("KEYWORDS_API_BASE_URL")
                    .unwrap_or(provider_defaults.base_url),
                timeout_secs: parse_env_or("KEYWORDS_API_TIMEOUT", provider_defaults.timeout_secs),
                batch_size: {
                    let size = parse_env_or("KEYWORDS_BATCH_SIZE", provider_defaults.batch_size);
                    if size == 0 {
                        tracing::warn!("KEYWORDS_BATCH_SIZE must be positive, using 1");
                        1
                    } else {
                        size
                    }
                },
                batch_delay_ms: parse_env_or(
                    "KEYWORDS_BATCH_DELAY_MS",
                    provider_defaults.batch_delay_ms,
                ),
                suspicious_volume_threshold: match parse_env_or(
                    "KEYWORDS_SUSPICIOUS_VOLUME",
                    5000_u64,
                ) {
                    0 => None,
                    threshold => Some(threshold),
                },
                country: env_non_empty("KEYWORDS_COUNTRY").unwrap_or(provider_defaults.country),
                currency: env_non_empty("KEYWORDS_CURRENCY").unwrap_or(provider_defaults.currency),
                data_source: env_non_empty("KEYWORDS_DATA_SOURCE")
                    .unwrap_or(provider_defaults.data_source),
            },
            tam: TamConfig {
                click_through_rate: parse_env_or(
                    "TAM_CLICK_THROUGH_RATE",
                    tam_defaults.click_through_rate,
                ),
                lead_conversion_rate: parse_env_or(
                    "TAM_LEAD_CONVERSION_RATE",
                    tam_defaults.lead_conversion_rate,
                ),
                close_rate: parse_env_or("TAM_CLOSE_RATE", tam_defaults.close_rate),
                average_ticket: parse_env_or("TAM_AVERAGE_TICKET", tam_defaults.average_ticket),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
