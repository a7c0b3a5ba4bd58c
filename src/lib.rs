//! Derived exchange-state engine for a futures trading dashboard.
//!
//! # Overview
//!
//! Pure, memoized computation graph that turns raw wallet/market/protocol
//! state into trade-eligibility decisions and price/fee conversions.
//!
//! [`state::Store`] holds the raw input snapshot and is updated only through
//! its pure reducer. [`select::ExchangeSelectors`] wires the derived-value
//! set onto the [`graph::Graph`] engine: one synchronous, side-effect-free
//! pass per snapshot, with every value memoized so an unchanged dependency
//! hands out the identical instance — the identity a reactive presentation
//! layer keys its change detection on.
//!
//! The [`query`] module keeps the snapshot fed: it polls the futures
//! subgraph on a fixed interval and the responses become new raw-state
//! inputs for the next pass.
//!
//! ```
//! use exchange_state::{select::ExchangeSelectors, state::{ExchangeAction, Store}};
//!
//! let store = Store::new()
//!     .apply(ExchangeAction::SetQuoteCurrencyKey(Some("sUSD".into())))
//!     .apply(ExchangeAction::SetBaseCurrencyKey(Some("sETH".into())))
//!     .apply(ExchangeAction::SetQuoteAmount("100".into()));
//!
//! let mut selectors = ExchangeSelectors::default();
//! selectors.evaluate(&store);
//! assert!(*selectors.get(selectors.both_sides_selected));
//! ```
//!
//! # Limitations/follow-ups
//!
//! * Wallet connectivity, transaction submission and contract access stay
//!   with the external SDK; this crate only consumes their state.
//! * Markets and positions subgraph queries are to follow; only trade
//!   history is covered.

pub mod error;
pub mod graph;
pub mod num;
pub mod query;
pub mod select;
pub mod state;
pub mod testing;
pub mod types;

use url::Url;

/// Network the dashboard operates against.
#[derive(Clone, Debug)]
pub struct Network {
    chain_id: u64,
    futures_endpoint: Url,
    epoch_start: Option<u64>,
}

impl Network {
    pub fn optimism() -> Self {
        Self {
            chain_id: 10,
            futures_endpoint: Url::parse(
                "https://api.thegraph.com/subgraphs/name/kwenta/optimism-futures",
            )
            .expect("static endpoint URL"),
            epoch_start: Some(1_668_556_800),
        }
    }

    pub fn optimism_goerli() -> Self {
        Self {
            chain_id: 420,
            futures_endpoint: Url::parse(
                "https://api.thegraph.com/subgraphs/name/kwenta/optimism-goerli-futures",
            )
            .expect("static endpoint URL"),
            epoch_start: Some(1_665_878_400),
        }
    }

    pub fn custom(chain_id: u64, futures_endpoint: Url, epoch_start: Option<u64>) -> Self {
        Self {
            chain_id,
            futures_endpoint,
            epoch_start,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Futures subgraph endpoint for this network.
    pub fn futures_endpoint(&self) -> &Url {
        &self.futures_endpoint
    }

    /// Start of the staking epoch schedule, if the network has one.
    pub fn epoch_start(&self) -> Option<u64> {
        self.epoch_start
    }
}
