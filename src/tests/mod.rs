use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    error::{TradingError, TradingResult},
    exchange::OrderGateway,
    models::{OrderConfirmation, OrderRequest},
};

mod order_request;

/// Journal sink that tests can read back.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Gateway that records every request and answers with a canned outcome.
pub struct MockGateway {
    pub fail_with: Option<fn() -> TradingError>,
    pub calls: Mutex<Vec<Vec<(&'static str, String)>>>,
}

impl MockGateway {
    pub fn accepting() -> Self {
        Self {
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: fn() -> TradingError) -> Self {
        Self {
            fail_with: Some(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<(&'static str, String)>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    async fn new_order(&self, req: &OrderRequest) -> TradingResult<OrderConfirmation> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(req.params());
        let order_id = calls.len() as u64;
        drop(calls);

        if let Some(err) = self.fail_with {
            return Err(err());
        }

        Ok(OrderConfirmation(json!({
            "orderId": order_id,
            "symbol": req.symbol,
            "status": "NEW",
            "type": req.order_type().as_str(),
            "side": req.side.as_str(),
            "origQty": req.quantity.to_string(),
        })))
    }
}

pub fn params(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}
