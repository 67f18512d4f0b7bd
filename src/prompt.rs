use std::io::{self, BufRead, Write};

use crate::models::{OrderType, RawOrderInput};

/// Asks for the order fields one by one. Only the price field that matches
/// the chosen order type is requested.
pub fn prompt_order<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<RawOrderInput> {
    let symbol = ask(input, output, "Enter symbol (e.g., BTCUSDT): ")?.to_uppercase();
    let side = ask(input, output, "Buy or Sell? ")?.to_uppercase();
    let order_type = ask(input, output, "Order type (MARKET, LIMIT, STOP_MARKET): ")?.to_uppercase();
    let quantity = ask(input, output, "Enter quantity: ")?;

    let mut price = None;
    let mut stop_price = None;
    match order_type.parse::<OrderType>() {
        Ok(OrderType::Limit) => price = Some(ask(input, output, "Enter limit price: ")?),
        Ok(OrderType::StopMarket) => stop_price = Some(ask(input, output, "Enter stop price: ")?),
        // Unknown types are rejected later, when the request is built.
        Ok(OrderType::Market) | Err(_) => {}
    }

    Ok(RawOrderInput {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed while waiting for: {}", question.trim()),
        ));
    }
    Ok(line.trim().to_string())
}
