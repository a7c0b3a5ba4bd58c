//! Identifiers and tags shared across the exchange state.

/// Symbolic currency identifier ("sUSD", "sETH", "ETH").
pub type CurrencyKey = String;

/// Stable reference synth prices are normalized against.
pub const USD_KEY: &str = "sUSD";

/// Synthetic ETH.
pub const ETH_SYNTH_KEY: &str = "sETH";

/// Native asset; never needs an ERC-20 allowance.
pub const NATIVE_ETH_KEY: &str = "ETH";

/// Execution venue that will route the trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TxProvider {
    #[default]
    Synthetix,
    OneInch,
    Synthswap,
}

/// Lifecycle of an external request as observed by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Why trade submission is currently inactive.
///
/// Produced by the first-match priority chain in
/// [`crate::select::ExchangeSelectors`]; variants are listed from most to
/// least operationally significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisabledReason {
    FeeReclaimPeriod,
    SelectToken,
    SelectSynth,
    InsufficientBalance,
    SubmittingOrder,
    Approving,
    InsufficientLiquidity,
    EnterAmount,
}

impl DisabledReason {
    /// Translatable message key consumed by the presentation layer.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::FeeReclaimPeriod => "exchange.summary-info.button.fee-reclaim-period",
            Self::SelectToken => "exchange.summary-info.button.select-token",
            Self::SelectSynth => "exchange.summary-info.button.select-synth",
            Self::InsufficientBalance => "exchange.summary-info.button.insufficient-balance",
            Self::SubmittingOrder => "exchange.summary-info.button.submitting-order",
            Self::Approving => "exchange.summary-info.button.approving",
            Self::InsufficientLiquidity => "exchange.summary-info.button.insufficient-liquidity",
            Self::EnterAmount => "exchange.summary-info.button.enter-amount",
        }
    }
}

/// Currency metadata resolver, normally backed by the protocol SDK.
pub trait CurrencyNames: Send + Sync {
    /// Human-readable name for a currency key, if known.
    fn currency_name(&self, key: &str) -> Option<String>;
}

/// Resolver that knows no names; display code falls back to the raw key.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCurrencyNames;

impl CurrencyNames for NoCurrencyNames {
    fn currency_name(&self, _key: &str) -> Option<String> {
        None
    }
}
