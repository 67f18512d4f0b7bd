use tracing::{info, warn};

use crate::{
    error::{ErrorHandler, TradingResult},
    exchange::OrderGateway,
    journal::OrderJournal,
    models::{OrderConfirmation, OrderRequest, RawOrderInput},
};

/// Sends one order per call and records every attempt in the journal.
///
/// There is no retry and no deduplication: submitting the same request twice
/// reaches the exchange twice.
pub struct OrderExecutor<G> {
    gateway: G,
    journal: OrderJournal,
}

impl<G: OrderGateway> OrderExecutor<G> {
    pub fn new(gateway: G, journal: OrderJournal) -> Self {
        Self { gateway, journal }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn submit(&self, req: &OrderRequest) -> TradingResult<OrderConfirmation> {
        info!("Submitting order: {}", req);

        match self.gateway.new_order(req).await {
            Ok(confirmation) => {
                info!(
                    order_id = confirmation.order_id(),
                    status = confirmation.status(),
                    "Order accepted"
                );
                self.journal.record_confirmation(&confirmation);
                Ok(confirmation)
            }
            Err(e) => {
                self.journal.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Coerces raw input and submits it. Every failure, including input the
    /// exchange would never see, is journaled and reported as `None`.
    pub async fn place_order(&self, input: &RawOrderInput) -> Option<OrderConfirmation> {
        let req = match input.into_request() {
            Ok(req) => req,
            Err(e) => {
                warn!("Order not sent: {}", ErrorHandler::handle_error(&e));
                self.journal.record_failure(&e);
                return None;
            }
        };

        match self.submit(&req).await {
            Ok(confirmation) => Some(confirmation),
            Err(e) => {
                ErrorHandler::handle_error(&e);
                None
            }
        }
    }
}
