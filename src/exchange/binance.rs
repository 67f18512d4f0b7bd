use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};
use url::{form_urlencoded, Url};

use crate::{
    config::ExchangeConfig,
    error::{TradingError, TradingResult},
    exchange::OrderGateway,
    models::{OrderConfirmation, OrderRequest},
    sign::signature,
};

const ORDER_ENDPOINT: &str = "/fapi/v1/order";

// Binance codes for a bad signature, malformed key and rejected key/IP/permissions.
const AUTH_ERROR_CODES: [i64; 3] = [-1022, -2014, -2015];

/// USD-M futures REST client, signing every order with the account's secret.
pub struct BinanceFutures {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    recv_window: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

impl BinanceFutures {
    pub fn new(cfg: &ExchangeConfig) -> TradingResult<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| TradingError::Configuration(format!("Invalid base URL: {}", e)))?;

        Ok(Self {
            http: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
            recv_window: cfg.recv_window,
        })
    }

    pub fn order_url(&self) -> String {
        format!("{}{}", self.base_url, ORDER_ENDPOINT)
    }

    fn credentials(&self) -> TradingResult<(&str, &str)> {
        if self.api_key.is_empty() {
            return Err(TradingError::Authentication("API key not set".to_string()));
        }
        if self.api_secret.is_empty() {
            return Err(TradingError::Authentication("API secret not set".to_string()));
        }
        Ok((&self.api_key, &self.api_secret))
    }

    /// Order parameters plus `recvWindow`, `timestamp` and the trailing `signature`.
    pub fn signed_query(&self, req: &OrderRequest, timestamp: i64) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in req.params() {
            query.append_pair(key, &value);
        }
        query.append_pair("recvWindow", &self.recv_window.to_string());
        query.append_pair("timestamp", &timestamp.to_string());
        let query = query.finish();

        let sign = signature(self.api_secret.as_bytes(), &query);
        format!("{}&signature={}", query, sign)
    }
}

#[async_trait]
impl OrderGateway for BinanceFutures {
    async fn new_order(&self, req: &OrderRequest) -> TradingResult<OrderConfirmation> {
        let (api_key, _) = self.credentials()?;

        info!("Placing {} order: {}", req.order_type(), req);
        let query = self.signed_query(req, Utc::now().timestamp_millis());

        let response = self
            .http
            .post(format!("{}?{}", self.order_url(), query))
            .header("X-MBX-APIKEY", api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Order response ({}): {}", status, body);

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        Ok(serde_json::from_str::<OrderConfirmation>(&body)?)
    }
}

/// Maps a non-2xx order response onto the error taxonomy.
pub fn classify_error(status: StatusCode, body: &str) -> TradingError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) if AUTH_ERROR_CODES.contains(&err.code) => {
            TradingError::Authentication(format!("{} (code {})", err.msg, err.code))
        }
        Ok(_) | Err(_) if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            TradingError::Authentication(format!(
                "status {}, response: {}",
                status,
                body.chars().take(200).collect::<String>()
            ))
        }
        Ok(err) => TradingError::OrderRejected {
            code: err.code,
            msg: err.msg,
        },
        Err(_) => TradingError::ExchangeApi(format!(
            "status {}, response: {}",
            status,
            body.chars().take(200).collect::<String>()
        )),
    }
}
