use rust_decimal::Decimal;
use std::str::FromStr;

use super::params;
use crate::{
    error::TradingError,
    models::{OrderKind, OrderRequest, OrderType, RawOrderInput, Side},
};

fn raw(order_type: &str, price: Option<&str>, stop_price: Option<&str>) -> RawOrderInput {
    RawOrderInput {
        symbol: "BTCUSDT".to_string(),
        side: "BUY".to_string(),
        order_type: order_type.to_string(),
        quantity: "0.01".to_string(),
        price: price.map(str::to_string),
        stop_price: stop_price.map(str::to_string),
    }
}

#[test]
fn market_request_has_no_price_fields() {
    let req = raw("MARKET", None, None).into_request().unwrap();
    assert_eq!(
        req.params(),
        params(&[
            ("symbol", "BTCUSDT"),
            ("side", "BUY"),
            ("type", "MARKET"),
            ("quantity", "0.01"),
        ])
    );
}

#[test]
fn market_request_ignores_stray_prices() {
    let req = raw("MARKET", Some("30000"), Some("28000")).into_request().unwrap();
    assert_eq!(req.kind, OrderKind::Market);
    assert!(req.params().iter().all(|(k, _)| !k.to_lowercase().contains("price")));
}

#[test]
fn limit_request_carries_price_and_gtc() {
    let req = raw("LIMIT", Some("30000"), None).into_request().unwrap();
    assert_eq!(
        req.params(),
        params(&[
            ("symbol", "BTCUSDT"),
            ("side", "BUY"),
            ("type", "LIMIT"),
            ("quantity", "0.01"),
            ("price", "30000"),
            ("timeInForce", "GTC"),
        ])
    );
}

#[test]
fn stop_market_request_carries_stop_price_and_gtc() {
    let req = raw("STOP_MARKET", None, Some("28000")).into_request().unwrap();
    assert_eq!(
        req.params(),
        params(&[
            ("symbol", "BTCUSDT"),
            ("side", "BUY"),
            ("type", "STOP_MARKET"),
            ("quantity", "0.01"),
            ("stopPrice", "28000"),
            ("timeInForce", "GTC"),
        ])
    );
}

#[test]
fn limit_without_price_is_missing_price() {
    for price in [None, Some(""), Some("   ")] {
        let err = raw("LIMIT", price, Some("28000")).into_request().unwrap_err();
        assert!(matches!(err, TradingError::MissingPrice(_)), "{:?}", err);
    }
}

#[test]
fn stop_market_without_stop_price_is_missing_price() {
    // A limit price does not stand in for the stop price.
    let err = raw("STOP_MARKET", Some("30000"), None).into_request().unwrap_err();
    assert!(matches!(err, TradingError::MissingPrice(_)));
}

#[test]
fn unknown_order_type_is_unsupported() {
    let err = raw("ICEBERG", Some("30000"), None).into_request().unwrap_err();
    match err {
        TradingError::UnsupportedOrderType(kind) => assert_eq!(kind, "ICEBERG"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn text_fields_are_normalised() {
    let input = RawOrderInput {
        symbol: " ethusdt ".to_string(),
        side: "sell".to_string(),
        order_type: " limit".to_string(),
        quantity: " 1.5 ".to_string(),
        price: Some(" 2500.25 ".to_string()),
        stop_price: None,
    };
    let req = input.into_request().unwrap();
    assert_eq!(
        req,
        OrderRequest::limit(
            "ETHUSDT",
            Side::Sell,
            Decimal::from_str("1.5").unwrap(),
            Decimal::from_str("2500.25").unwrap(),
        )
    );
}

#[test]
fn bad_numbers_and_sides_are_rejected() {
    let mut input = raw("LIMIT", Some("abc"), None);
    assert!(matches!(input.into_request(), Err(TradingError::InvalidPrice(_))));

    input.price = Some("30000".to_string());
    input.quantity = "lots".to_string();
    assert!(matches!(input.into_request(), Err(TradingError::InvalidQuantity(_))));

    input.quantity = "0.01".to_string();
    input.side = "HOLD".to_string();
    assert!(matches!(input.into_request(), Err(TradingError::InvalidSide(_))));
}

#[test]
fn negative_quantity_is_forwarded_to_the_exchange() {
    let mut input = raw("MARKET", None, None);
    input.quantity = "-0.01".to_string();
    let req = input.into_request().unwrap();
    assert_eq!(req.quantity, Decimal::from_str("-0.01").unwrap());
}

#[test]
fn order_type_round_trips_through_its_wire_name() {
    for kind in OrderType::ALL {
        assert_eq!(kind.as_str().parse::<OrderType>().unwrap(), kind);
    }
}

#[test]
fn display_reads_like_an_order_ticket() {
    let req = raw("STOP_MARKET", None, Some("28000")).into_request().unwrap();
    assert_eq!(req.to_string(), "BUY 0.01 BTCUSDT STOP_MARKET stop 28000");
}
