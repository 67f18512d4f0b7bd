use std::{env, fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TradingError, TradingResult};

pub const TESTNET_FUTURES_URL: &str = "https://testnet.binancefuture.com";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub recv_window: u64, // milliseconds
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: TESTNET_FUTURES_URL.to_string(),
            recv_window: 5000,
        }
    }
}

impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub order_log: PathBuf,
    pub diagnostics_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            order_log: PathBuf::from("trading_bot.log"),
            diagnostics_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> TradingResult<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> TradingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_vars(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then overlay the environment
    pub fn from_file(path: &str) -> TradingResult<Self> {
        Self::from_file_with_vars(path, |key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_file`] but overlays variables read through `lookup`.
    pub fn from_file_with_vars<F>(path: &str, lookup: F) -> TradingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TradingError::Configuration(format!("Failed to read config file: {}", e)))?;

        let mut config: AppConfig = toml::from_str(&content)
            .map_err(|e| TradingError::Configuration(format!("Failed to parse config file: {}", e)))?;

        config.apply_vars(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_vars(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> TradingResult<()> {
        // Credentials are checked at call time, so missing ones are not an error here.
        if let Some(api_key) = lookup("BINANCE_API_KEY") {
            self.exchange.api_key = api_key;
        }

        if let Some(api_secret) = lookup("BINANCE_API_SECRET") {
            self.exchange.api_secret = api_secret;
        }

        if let Some(base_url) = lookup("BINANCE_FUTURES_URL") {
            self.exchange.base_url = base_url;
        }

        if let Some(recv_window) = lookup("BINANCE_RECV_WINDOW") {
            self.exchange.recv_window = recv_window
                .parse()
                .map_err(|_| TradingError::Configuration("Invalid BINANCE_RECV_WINDOW".to_string()))?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        if let Some(order_log) = lookup("ORDER_LOG_FILE") {
            self.logging.order_log = PathBuf::from(order_log);
        }

        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.diagnostics_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> TradingResult<()> {
        Url::parse(&self.exchange.base_url).map_err(|e| {
            TradingError::Configuration(format!("Invalid base URL {:?}: {}", self.exchange.base_url, e))
        })?;

        if self.exchange.recv_window == 0 || self.exchange.recv_window > 60_000 {
            return Err(TradingError::Configuration(
                "recv_window must be between 1 and 60000 ms".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(TradingError::Configuration(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        if self.logging.order_log.as_os_str().is_empty() {
            return Err(TradingError::Configuration("Order log path cannot be empty".to_string()));
        }

        Ok(())
    }
}
