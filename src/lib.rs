pub mod config;
pub mod error;
pub mod exchange;
pub mod execution;
pub mod form;
pub mod journal;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod sign;

#[cfg(test)]
mod tests;

pub use error::{TradingError, TradingResult};
pub use execution::OrderExecutor;
pub use models::{OrderConfirmation, OrderKind, OrderRequest, OrderType, RawOrderInput, Side};
