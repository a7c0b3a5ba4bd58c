//! Test fixtures: populated state snapshots and a static currency resolver.
//!
//! Builders go through the public [`Store::apply`] reducer, so fixture
//! construction exercises the same path production updates take.

use std::collections::HashMap;

use crate::{
    state::{BalancesAction, ExchangeAction, Store, SynthBalance, WalletAction},
    types::{CurrencyKey, CurrencyNames, FetchStatus, TxProvider},
};

/// Builder for [`Store`] snapshots.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    store: Store,
    balances_map: HashMap<CurrencyKey, SynthBalance>,
    token_balances: HashMap<CurrencyKey, SynthBalance>,
    exchange_rates: HashMap<CurrencyKey, String>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quote_amount(mut self, amount: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetQuoteAmount(amount.to_owned()));
        self
    }

    pub fn base_amount(mut self, amount: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetBaseAmount(amount.to_owned()));
        self
    }

    /// Selects both sides of the trade pair.
    pub fn pair(mut self, quote: &str, base: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetQuoteCurrencyKey(Some(quote.to_owned())))
            .apply(ExchangeAction::SetBaseCurrencyKey(Some(base.to_owned())));
        self
    }

    pub fn rate(mut self, rate: &str) -> Self {
        self.store = self.store.apply(ExchangeAction::SetRate(Some(rate.to_owned())));
        self
    }

    pub fn quote_price_rate(mut self, rate: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetQuotePriceRate(Some(rate.to_owned())));
        self
    }

    pub fn base_price_rate(mut self, rate: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetBasePriceRate(Some(rate.to_owned())));
        self
    }

    pub fn exchange_rate(mut self, key: &str, rate: &str) -> Self {
        self.exchange_rates.insert(key.to_owned(), rate.to_owned());
        self
    }

    pub fn synth_balance(mut self, key: &str, balance: &str, usd: Option<&str>) -> Self {
        self.balances_map.insert(
            key.to_owned(),
            SynthBalance::new(balance, usd.map(str::to_owned)),
        );
        self
    }

    pub fn token_balance(mut self, key: &str, balance: &str) -> Self {
        self.token_balances
            .insert(key.to_owned(), SynthBalance::new(balance, None));
        self
    }

    pub fn tx_provider(mut self, provider: TxProvider) -> Self {
        self.store = self.store.apply(ExchangeAction::SetTxProvider(provider));
        self
    }

    pub fn allowance(mut self, allowance: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetAllowance(Some(allowance.to_owned())));
        self
    }

    pub fn fee_reclaim_period(mut self, seconds: u64) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetFeeReclaimPeriod(seconds));
        self
    }

    pub fn submitting(mut self, submitting: bool) -> Self {
        self.store = self.store.apply(ExchangeAction::SetSubmitting(submitting));
        self
    }

    /// Marks the approval transaction as in flight.
    pub fn approving(mut self) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetApprovalStatus(FetchStatus::Loading));
        self
    }

    pub fn one_inch_quote_error(mut self, message: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetOneInchQuoteError(Some(message.to_owned())));
        self
    }

    pub fn total_redeemable_balance(mut self, total: &str) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetTotalRedeemableBalance(Some(total.to_owned())));
        self
    }

    pub fn redeemable_synth_balances(mut self, balances: Vec<SynthBalance>) -> Self {
        self.store = self
            .store
            .apply(ExchangeAction::SetRedeemableSynthBalances(balances));
        self
    }

    pub fn wallet_connected(mut self) -> Self {
        self.store = self
            .store
            .apply(WalletAction::SetConnected(true))
            .apply(WalletAction::SetAppReady(true))
            .apply(WalletAction::SetLayer2(true));
        self
    }

    pub fn build(self) -> Store {
        let mut store = self.store;
        if !self.exchange_rates.is_empty() {
            store = store.apply(ExchangeAction::SetExchangeRates(self.exchange_rates));
        }
        if !self.balances_map.is_empty() {
            store = store.apply(BalancesAction::SetBalancesMap(self.balances_map));
        }
        if !self.token_balances.is_empty() {
            store = store.apply(BalancesAction::SetTokenBalances(self.token_balances));
        }
        store
    }
}

/// Fixed currency-name table standing in for the protocol SDK resolver.
#[derive(Debug)]
pub struct StaticNames(HashMap<&'static str, &'static str>);

impl Default for StaticNames {
    fn default() -> Self {
        Self(HashMap::from([
            ("sUSD", "Synthetic US Dollar"),
            ("sETH", "Synthetic Ether"),
            ("sBTC", "Synthetic Bitcoin"),
            ("ETH", "Ether"),
        ]))
    }
}

impl CurrencyNames for StaticNames {
    fn currency_name(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|name| (*name).to_string())
    }
}
