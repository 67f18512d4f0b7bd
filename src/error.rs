use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Order rejected by exchange (code {code}): {msg}")]
    OrderRejected { code: i64, msg: String },

    #[error("Exchange API error: {0}")]
    ExchangeApi(String),

    #[error("Invalid exchange response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported order type: {0}")]
    UnsupportedOrderType(String),

    #[error("Invalid side: {0}")]
    InvalidSide(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Missing price: {0}")]
    MissingPrice(String),
}

impl From<reqwest::Error> for TradingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TradingError::Network(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            TradingError::Network(format!("Connection error: {}", err))
        } else {
            TradingError::Network(format!("HTTP error: {}", err))
        }
    }
}

impl From<serde_json::Error> for TradingError {
    fn from(err: serde_json::Error) -> Self {
        TradingError::InvalidResponse(format!("JSON parsing error: {}", err))
    }
}

pub type TradingResult<T> = Result<T, TradingError>;

/// Error handling utilities
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log error and return a user-friendly message
    pub fn handle_error(error: &TradingError) -> String {
        match error {
            TradingError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
            }
            TradingError::Network(msg) => {
                tracing::error!("Network error: {}", msg);
            }
            TradingError::Authentication(msg) => {
                tracing::error!("Authentication error: {}", msg);
            }
            TradingError::OrderRejected { code, msg } => {
                tracing::warn!(code, "Order rejected: {}", msg);
            }
            TradingError::ExchangeApi(msg) => {
                tracing::error!("Exchange API error: {}", msg);
            }
            TradingError::InvalidResponse(msg) => {
                tracing::error!("Invalid exchange response: {}", msg);
            }
            TradingError::UnsupportedOrderType(kind) => {
                tracing::warn!("Unsupported order type: {}", kind);
            }
            TradingError::InvalidSide(msg)
            | TradingError::InvalidQuantity(msg)
            | TradingError::InvalidPrice(msg)
            | TradingError::MissingPrice(msg) => {
                tracing::warn!("Invalid order input: {}", msg);
            }
        }
        error.to_string()
    }
}
