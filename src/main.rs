use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use testnet_order_bot::{
    config::AppConfig,
    exchange::{BinanceFutures, OrderGateway},
    execution::OrderExecutor,
    form,
    journal::OrderJournal,
    logger::init_tracing,
    models::RawOrderInput,
    prompt::prompt_order,
};

const FAILURE_MESSAGE: &str = "Order failed. Check logs or try again.";

#[derive(Parser)]
#[clap(name = "testnet-order-bot")]
#[clap(about = "Place a single order on the Binance Futures testnet")]
struct Cli {
    /// TOML config file; environment variables still apply on top of it
    #[clap(short, long)]
    config: Option<String>,

    /// Override the configured log level
    #[clap(long)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask for each order field on the console (default)
    Prompt,
    /// Fill in the order in a terminal form
    Form,
    /// Place an order straight from command-line flags
    Place {
        #[clap(long)]
        symbol: String,
        #[clap(long)]
        side: String,
        #[clap(long = "type")]
        order_type: String,
        #[clap(long)]
        quantity: String,
        #[clap(long)]
        price: Option<String>,
        #[clap(long)]
        stop_price: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level.to_lowercase();
        config.validate()?;
    }

    let command = cli.command.unwrap_or(Command::Prompt);
    let console_logs = !matches!(command, Command::Form);
    let _guard = init_tracing(
        &config.logging.level,
        console_logs,
        config.logging.diagnostics_dir.as_deref(),
    );
    info!(exchange = ?config.exchange, "Configuration loaded");

    let gateway = BinanceFutures::new(&config.exchange)?;
    let journal = OrderJournal::open(&config.logging.order_log)
        .with_context(|| format!("opening {}", config.logging.order_log.display()))?;
    let executor = OrderExecutor::new(gateway, journal);

    match command {
        Command::Prompt => {
            let stdin = io::stdin();
            let raw = prompt_order(&mut stdin.lock(), &mut io::stdout())?;
            report(&executor, &raw).await;
        }
        Command::Form => form::run(&executor).await?,
        Command::Place {
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
        } => {
            let raw = RawOrderInput {
                symbol,
                side,
                order_type,
                quantity,
                price,
                stop_price,
            };
            report(&executor, &raw).await;
        }
    }

    Ok(())
}

async fn report<G: OrderGateway>(executor: &OrderExecutor<G>, raw: &RawOrderInput) {
    match executor.place_order(raw).await {
        Some(confirmation) => println!("Order Result: {}", confirmation.to_pretty()),
        None => println!("{}", FAILURE_MESSAGE),
    }
}
