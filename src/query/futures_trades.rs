//! Futures-trades subgraph client.
//!
//! Thin GraphQL-over-HTTP wrapper around the futures subgraph. Raw records
//! arrive with 18-decimal fixed-point integer fields and bytes32-encoded
//! asset keys; both are normalized here before anything reaches the store.

use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{error::StateError, num::Wei, types::CurrencyKey};

/// Default page size for trade history queries.
pub const DEFAULT_NUMBER_OF_TRADES: usize = 32;

/// One futures trade, with fixed-point fields already normalized from raw
/// 18-decimal units.
#[derive(Clone, Debug, PartialEq)]
pub struct FuturesTrade {
    pub id: String,
    pub timestamp: u64,
    pub account: String,
    pub asset: CurrencyKey,
    pub size: Wei,
    pub price: Wei,
    pub position_id: String,
    pub position_size: Wei,
    pub position_closed: bool,
    pub pnl: Wei,
    pub fees_paid: Wei,
    pub order_type: String,
}

/// Parameters of a trade history query, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TradesQuery {
    pub first: usize,
    /// Restrict to a single asset; `None` fetches across all markets.
    pub asset: Option<CurrencyKey>,
}

impl Default for TradesQuery {
    fn default() -> Self {
        Self {
            first: DEFAULT_NUMBER_OF_TRADES,
            asset: None,
        }
    }
}

impl TradesQuery {
    pub fn for_asset(key: impl Into<CurrencyKey>) -> Self {
        Self {
            asset: Some(key.into()),
            ..Self::default()
        }
    }

    fn document(&self) -> Result<String, StateError> {
        let filter = match &self.asset {
            Some(asset) => format!(r#", where: {{ asset: "{}" }}"#, format_bytes32(asset)?),
            None => String::new(),
        };
        Ok(format!(
            "{{ futuresTrades(first: {}, orderBy: timestamp, orderDirection: desc{}) \
             {{ id timestamp account size asset price positionId positionSize \
             positionClosed pnl feesPaid orderType }} }}",
            self.first, filter
        ))
    }
}

/// GraphQL client for a single subgraph endpoint.
#[derive(Clone, Debug)]
pub struct SubgraphClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SubgraphClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches trade history, newest first.
    pub async fn trades(&self, query: &TradesQuery) -> Result<Vec<FuturesTrade>, StateError> {
        let body = serde_json::json!({ "query": query.document()? });
        let response: TradesResponse = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(errors) = response.errors {
            return Err(StateError::Subgraph(
                errors.into_iter().map(|e| e.message).join("; "),
            ));
        }

        let trades: Vec<_> = response
            .data
            .map(|data| data.futures_trades.into_iter().map(map_trade).collect())
            .unwrap_or_default();
        debug!(endpoint = %self.endpoint, count = trades.len(), "fetched futures trades");
        Ok(trades)
    }
}

#[derive(Debug, Deserialize)]
struct TradesResponse {
    data: Option<TradesData>,
    errors: Option<Vec<GraphError>>,
}

#[derive(Debug, Deserialize)]
struct TradesData {
    #[serde(rename = "futuresTrades", default)]
    futures_trades: Vec<RawTrade>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrade {
    id: String,
    timestamp: String,
    account: String,
    asset: String,
    size: String,
    price: String,
    position_id: String,
    position_size: String,
    position_closed: bool,
    pnl: String,
    fees_paid: String,
    order_type: String,
}

fn map_trade(raw: RawTrade) -> FuturesTrade {
    FuturesTrade {
        id: raw.id,
        timestamp: raw.timestamp.parse().unwrap_or_default(),
        account: raw.account,
        asset: parse_bytes32(&raw.asset),
        size: Wei::from_units(&raw.size),
        price: Wei::from_units(&raw.price),
        position_id: raw.position_id,
        position_size: Wei::from_units(&raw.position_size),
        position_closed: raw.position_closed,
        pnl: Wei::from_units(&raw.pnl),
        fees_paid: Wei::from_units(&raw.fees_paid),
        order_type: raw.order_type,
    }
}

/// Encodes a currency key the way the subgraph stores assets: UTF-8 bytes
/// right-padded with zeros to 32 bytes, hex with a 0x prefix.
fn format_bytes32(key: &str) -> Result<String, StateError> {
    if key.len() > 31 {
        return Err(StateError::CurrencyKeyTooLong(key.to_owned()));
    }
    let mut bytes = [0u8; 32];
    bytes[..key.len()].copy_from_slice(key.as_bytes());
    Ok(format!(
        "0x{}",
        bytes
            .iter()
            .format_with("", |byte, f| f(&format_args!("{byte:02x}")))
    ))
}

/// Inverse of [`format_bytes32`]: decodes up to the first zero byte.
fn parse_bytes32(hex: &str) -> String {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes: Vec<u8> = (0..hex.len())
        .step_by(2)
        .map_while(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .take_while(|byte| *byte != 0)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
