//! Trade monitor binary - polls futures trade history and prints a live
//! market summary.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): endpoint override
//! - CLI arguments: network, market and polling parameters

use std::{pin::pin, process::exit, time::Duration};

use clap::Parser;
use exchange_state::{
    Network,
    query::{DEFAULT_NUMBER_OF_TRADES, QueryCache, QueryKey, SubgraphClient, TradesQuery, poll_trades},
    select::ExchangeSelectors,
    state::{ExchangeAction, Store},
    types::USD_KEY,
};
use futures::StreamExt;
use itertools::Itertools;
use tracing::info;
use url::Url;

/// Environment configuration (connection details).
#[derive(Debug, serde::Deserialize)]
struct EnvConfig {
    /// Override the subgraph endpoint for the chosen network
    futures_endpoint: Option<String>,

    /// Chain ID to report when an endpoint override is used
    chain_id: Option<u64>,
}

impl EnvConfig {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

#[derive(Parser, Debug)]
#[command(name = "trade_monitor")]
#[command(about = "Poll futures trade history and print a market summary")]
struct Args {
    /// Network to connect to: optimism or optimism-goerli
    #[arg(short, long, default_value = "optimism")]
    network: String,

    /// Restrict to one market by currency key (e.g. sETH); all markets if
    /// not given
    #[arg(short, long)]
    currency: Option<String>,

    /// Number of trades to fetch per poll
    #[arg(short, long, default_value_t = DEFAULT_NUMBER_OF_TRADES)]
    first: usize,

    /// Poll interval in seconds
    #[arg(short, long, default_value = "15")]
    poll_interval: u64,
}

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let args = Args::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let network = match args.network.as_str() {
        "optimism" => Network::optimism(),
        "optimism-goerli" => Network::optimism_goerli(),
        other => {
            eprintln!("Unknown network '{}'; use optimism or optimism-goerli", other);
            exit(1);
        }
    };

    // An endpoint override turns the network into a custom one so the query
    // cache keys don't collide with the real network's entries
    let network = match env_config.futures_endpoint.as_deref() {
        Some(endpoint) => {
            let endpoint = match Url::parse(endpoint) {
                Ok(url) => url,
                Err(e) => {
                    eprintln!("Invalid FUTURES_ENDPOINT: {}", e);
                    exit(1);
                }
            };
            Network::custom(
                env_config.chain_id.unwrap_or_else(|| network.chain_id()),
                endpoint,
                network.epoch_start(),
            )
        }
        None => network,
    };

    let client = SubgraphClient::new(network.futures_endpoint().clone());
    let query = TradesQuery {
        first: args.first,
        asset: args.currency.clone(),
    };
    let key = QueryKey {
        network_id: network.chain_id(),
        query: query.clone(),
    };
    let cache = QueryCache::new();

    info!(
        chain_id = network.chain_id(),
        endpoint = %network.futures_endpoint(),
        currency = query.asset.as_deref().unwrap_or("all"),
        "starting trade monitor"
    );

    let mut selectors = ExchangeSelectors::default();
    let mut store = Store::new();

    let mut trades_stream = pin!(poll_trades(
        client,
        query,
        Duration::from_secs(args.poll_interval),
        || true,
        tokio::time::sleep,
    ));

    while let Some(item) = trades_stream.next().await {
        let Some(trades) = item else {
            // Fetch failed; the poll layer already logged it
            continue;
        };
        let trades = cache.insert(key.clone(), trades);

        if trades.is_empty() {
            info!("no trades yet");
            continue;
        }

        let summary = trades
            .iter()
            .take(5)
            .map(|t| format!("{} {} @ {}", t.asset, t.size, t.price))
            .join(" | ");
        info!(count = trades.len(), latest = %summary, "trade history updated");

        // Feed the newest price per asset into the store and run a selector
        // pass, latest trade wins since results arrive newest first
        let mut rates = std::collections::HashMap::new();
        rates.insert(USD_KEY.to_owned(), "1".to_owned());
        for trade in trades.iter().rev() {
            rates.insert(trade.asset.clone(), trade.price.to_string());
        }
        store = store.apply(ExchangeAction::SetExchangeRates(rates));
        selectors.evaluate(&store);

        let rates = selectors.get(selectors.exchange_rates_wei);
        let line = rates
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(asset, rate)| format!("{asset}: {rate}"))
            .join(", ");
        info!(%line, "last trade prices");
    }
}
