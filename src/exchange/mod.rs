use async_trait::async_trait;

use crate::{
    error::TradingResult,
    models::{OrderConfirmation, OrderRequest},
};

pub mod binance;

pub use binance::BinanceFutures;

/// Anything that can take a single order to an exchange.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn new_order(&self, req: &OrderRequest) -> TradingResult<OrderConfirmation>;
}
