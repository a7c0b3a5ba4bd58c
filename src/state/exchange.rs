use std::collections::HashMap;

use super::SynthBalance;
use crate::types::{CurrencyKey, FetchStatus, TxProvider};

/// Raw exchange input fields, written by user input events and by responses
/// from the protocol SDK. Owns no derived values.
///
/// Amounts and rates are kept as the decimal strings they arrive as; parsing
/// into fixed-point happens in the selector graph so that blank or malformed
/// input never faults the store.
#[derive(Clone, Debug, Default)]
pub struct ExchangeState {
    quote_amount: String,
    base_amount: String,
    quote_currency_key: Option<CurrencyKey>,
    base_currency_key: Option<CurrencyKey>,
    rate: Option<String>,
    quote_price_rate: Option<String>,
    base_price_rate: Option<String>,
    exchange_fee_rate: Option<String>,
    slippage_percent: Option<String>,
    base_fee_rate: Option<String>,
    exchange_rates: HashMap<CurrencyKey, String>,
    tx_provider: TxProvider,
    allowance: Option<String>,
    fee_reclaim_period: u64,
    is_submitting: bool,
    approval_status: FetchStatus,
    one_inch_quote_error: Option<String>,
    redeemable_synth_balances: Vec<SynthBalance>,
    total_redeemable_balance: Option<String>,
    transaction_fee: Option<String>,
    fee_cost: Option<String>,
}

/// Mutations of the exchange sub-state, one per independently settable field.
#[derive(Clone, Debug)]
pub enum ExchangeAction {
    SetQuoteAmount(String),
    SetBaseAmount(String),
    SetQuoteCurrencyKey(Option<CurrencyKey>),
    SetBaseCurrencyKey(Option<CurrencyKey>),
    SetRate(Option<String>),
    SetQuotePriceRate(Option<String>),
    SetBasePriceRate(Option<String>),
    SetExchangeFeeRate(Option<String>),
    SetSlippagePercent(Option<String>),
    SetBaseFeeRate(Option<String>),
    SetExchangeRates(HashMap<CurrencyKey, String>),
    SetTxProvider(TxProvider),
    SetAllowance(Option<String>),
    SetFeeReclaimPeriod(u64),
    SetSubmitting(bool),
    SetApprovalStatus(FetchStatus),
    SetOneInchQuoteError(Option<String>),
    SetRedeemableSynthBalances(Vec<SynthBalance>),
    SetTotalRedeemableBalance(Option<String>),
    SetTransactionFee(Option<String>),
    SetFeeCost(Option<String>),
}

impl ExchangeState {
    /// Quote-side amount as typed by the user; may be empty.
    pub fn quote_amount(&self) -> &str {
        &self.quote_amount
    }

    /// Base-side amount as typed by the user; may be empty.
    pub fn base_amount(&self) -> &str {
        &self.base_amount
    }

    pub fn quote_currency_key(&self) -> Option<&str> {
        self.quote_currency_key.as_deref()
    }

    pub fn base_currency_key(&self) -> Option<&str> {
        self.base_currency_key.as_deref()
    }

    /// Quote/base conversion rate reported by the protocol.
    pub fn rate(&self) -> Option<&str> {
        self.rate.as_deref()
    }

    pub fn quote_price_rate(&self) -> Option<&str> {
        self.quote_price_rate.as_deref()
    }

    pub fn base_price_rate(&self) -> Option<&str> {
        self.base_price_rate.as_deref()
    }

    pub fn exchange_fee_rate(&self) -> Option<&str> {
        self.exchange_fee_rate.as_deref()
    }

    pub fn slippage_percent(&self) -> Option<&str> {
        self.slippage_percent.as_deref()
    }

    pub fn base_fee_rate(&self) -> Option<&str> {
        self.base_fee_rate.as_deref()
    }

    /// Last reported rate table, keyed by currency. Key order is irrelevant.
    pub fn exchange_rates(&self) -> &HashMap<CurrencyKey, String> {
        &self.exchange_rates
    }

    pub fn tx_provider(&self) -> TxProvider {
        self.tx_provider
    }

    /// ERC-20 allowance granted to the router, if fetched.
    pub fn allowance(&self) -> Option<&str> {
        self.allowance.as_deref()
    }

    /// Seconds remaining in the fee-reclaim lockout; zero when not locked.
    pub fn fee_reclaim_period(&self) -> u64 {
        self.fee_reclaim_period
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn approval_status(&self) -> FetchStatus {
        self.approval_status
    }

    pub fn one_inch_quote_error(&self) -> Option<&str> {
        self.one_inch_quote_error.as_deref()
    }

    pub fn redeemable_synth_balances(&self) -> &[SynthBalance] {
        &self.redeemable_synth_balances
    }

    pub fn total_redeemable_balance(&self) -> Option<&str> {
        self.total_redeemable_balance.as_deref()
    }

    pub fn transaction_fee(&self) -> Option<&str> {
        self.transaction_fee.as_deref()
    }

    pub fn fee_cost(&self) -> Option<&str> {
        self.fee_cost.as_deref()
    }

    pub(crate) fn reduce(&mut self, action: ExchangeAction) {
        match action {
            ExchangeAction::SetQuoteAmount(v) => self.quote_amount = v,
            ExchangeAction::SetBaseAmount(v) => self.base_amount = v,
            ExchangeAction::SetQuoteCurrencyKey(v) => self.quote_currency_key = v,
            ExchangeAction::SetBaseCurrencyKey(v) => self.base_currency_key = v,
            ExchangeAction::SetRate(v) => self.rate = v,
            ExchangeAction::SetQuotePriceRate(v) => self.quote_price_rate = v,
            ExchangeAction::SetBasePriceRate(v) => self.base_price_rate = v,
            ExchangeAction::SetExchangeFeeRate(v) => self.exchange_fee_rate = v,
            ExchangeAction::SetSlippagePercent(v) => self.slippage_percent = v,
            ExchangeAction::SetBaseFeeRate(v) => self.base_fee_rate = v,
            ExchangeAction::SetExchangeRates(v) => self.exchange_rates = v,
            ExchangeAction::SetTxProvider(v) => self.tx_provider = v,
            ExchangeAction::SetAllowance(v) => self.allowance = v,
            ExchangeAction::SetFeeReclaimPeriod(v) => self.fee_reclaim_period = v,
            ExchangeAction::SetSubmitting(v) => self.is_submitting = v,
            ExchangeAction::SetApprovalStatus(v) => self.approval_status = v,
            ExchangeAction::SetOneInchQuoteError(v) => self.one_inch_quote_error = v,
            ExchangeAction::SetRedeemableSynthBalances(v) => self.redeemable_synth_balances = v,
            ExchangeAction::SetTotalRedeemableBalance(v) => self.total_redeemable_balance = v,
            ExchangeAction::SetTransactionFee(v) => self.transaction_fee = v,
            ExchangeAction::SetFeeCost(v) => self.fee_cost = v,
        }
    }
}
