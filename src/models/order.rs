use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TradingError, TradingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl FromStr for Side {
    type Err = TradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(TradingError::InvalidSide(format!(
                "expected BUY or SELL, got {:?}",
                other
            ))),
        }
    }
}

/// Order type as picked by a user, before any price is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
}

impl OrderType {
    pub const ALL: [OrderType; 3] = [OrderType::Market, OrderType::Limit, OrderType::StopMarket];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopMarket => "STOP_MARKET",
        }
    }
}

impl FromStr for OrderType {
    type Err = TradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_MARKET" => Ok(OrderType::StopMarket),
            other => Err(TradingError::UnsupportedOrderType(other.to_string())),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    Gtc,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
        }
    }
}

/// Order kind together with the one price field it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit { price: Decimal },
    StopMarket { stop_price: Decimal },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopMarket { .. } => OrderType::StopMarket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub kind: OrderKind,
    pub quantity: Decimal,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::Market,
            quantity,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::Limit { price },
            quantity,
        }
    }

    pub fn stop_market(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::StopMarket { stop_price },
            quantity,
        }
    }

    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    /// Request parameters in the order they are sent to the exchange.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type().as_str().to_string()),
            ("quantity", self.quantity.to_string()),
        ];

        match self.kind {
            OrderKind::Market => {}
            OrderKind::Limit { price } => {
                params.push(("price", price.to_string()));
                params.push(("timeInForce", TimeInForce::Gtc.as_str().to_string()));
            }
            OrderKind::StopMarket { stop_price } => {
                params.push(("stopPrice", stop_price.to_string()));
                params.push(("timeInForce", TimeInForce::Gtc.as_str().to_string()));
            }
        }

        params
    }
}

impl fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.side.as_str(),
            self.quantity,
            self.symbol,
            self.order_type()
        )?;
        match self.kind {
            OrderKind::Market => Ok(()),
            OrderKind::Limit { price } => write!(f, " @ {}", price),
            OrderKind::StopMarket { stop_price } => write!(f, " stop {}", stop_price),
        }
    }
}

/// Order fields exactly as a user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrderInput {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
    pub stop_price: Option<String>,
}

impl RawOrderInput {
    /// Coerces the text fields into a typed request.
    ///
    /// The symbol is only normalised, and quantity is only required to be a
    /// number; the exchange is left to reject anything else.
    pub fn into_request(&self) -> TradingResult<OrderRequest> {
        let symbol = self.symbol.trim().to_uppercase();
        let side: Side = self.side.parse()?;
        let order_type: OrderType = self.order_type.parse()?;

        let quantity = Decimal::from_str(self.quantity.trim()).map_err(|e| {
            TradingError::InvalidQuantity(format!("{:?} is not a number: {}", self.quantity, e))
        })?;

        let kind = match order_type {
            OrderType::Market => OrderKind::Market,
            OrderType::Limit => OrderKind::Limit {
                price: required_price(self.price.as_deref(), "LIMIT orders require a price")?,
            },
            OrderType::StopMarket => OrderKind::StopMarket {
                stop_price: required_price(
                    self.stop_price.as_deref(),
                    "STOP_MARKET orders require a stop price",
                )?,
            },
        };

        Ok(OrderRequest {
            symbol,
            side,
            kind,
            quantity,
        })
    }
}

fn required_price(raw: Option<&str>, missing: &str) -> TradingResult<Decimal> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(TradingError::MissingPrice(missing.to_string())),
    };
    Decimal::from_str(raw)
        .map_err(|e| TradingError::InvalidPrice(format!("{:?} is not a number: {}", raw, e)))
}

/// Exchange confirmation, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderConfirmation(pub serde_json::Value);

impl OrderConfirmation {
    pub fn order_id(&self) -> Option<u64> {
        self.0.get("orderId").and_then(|v| v.as_u64())
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
