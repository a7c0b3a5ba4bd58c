//! Derived exchange selectors.
//!
//! Wires the full selector set for the exchange screen onto a
//! [`Graph`]: fixed-point normalization of raw amount/rate strings, balance
//! and approval checks, price conversions and the submission-eligibility
//! chain. All selectors are pure and total; absent raw fields surface as
//! zero or `None`, never as an error.

use std::{collections::HashMap, sync::Arc};

use crate::{
    graph::{Graph, Handle},
    num::Wei,
    state::{Store, SynthBalance},
    types::{
        self, CurrencyKey, CurrencyNames, DisabledReason, FetchStatus, NoCurrencyNames, TxProvider,
    },
};

/// Rate between two currencies out of a rates table.
///
/// Zero when either side is missing or the quote rate is zero; price-display
/// code must treat zero as "no quote", not as a literal price.
pub fn pair_rate(rates: &HashMap<CurrencyKey, Wei>, base: &str, quote: &str) -> Wei {
    let Some(base_rate) = rates.get(base) else {
        return Wei::ZERO;
    };
    let Some(quote_rate) = rates.get(quote) else {
        return Wei::ZERO;
    };
    base_rate.checked_div(*quote_rate).unwrap_or(Wei::ZERO)
}

/// The derived-value set for the exchange screen.
///
/// Handles are public so presentation code can read exactly the values it
/// renders; [`Self::evaluate`] runs one synchronous pass over a [`Store`]
/// snapshot and [`Self::get`] returns memoized instances, pointer-identical
/// across passes while their dependencies are unchanged.
pub struct ExchangeSelectors {
    graph: Graph<Store>,
    pub quote_amount_wei: Handle<Wei>,
    pub base_amount_wei: Handle<Wei>,
    pub both_sides_selected: Handle<bool>,
    pub quote_currency_name: Handle<Option<String>>,
    pub base_currency_name: Handle<Option<String>>,
    pub total_usd_balance: Handle<Wei>,
    pub no_synths: Handle<bool>,
    pub show_fee: Handle<bool>,
    pub rate_wei: Handle<Wei>,
    pub inverse_rate: Handle<Wei>,
    pub quote_balance_wei: Handle<Wei>,
    pub base_balance_wei: Handle<Wei>,
    pub insufficient_balance: Handle<bool>,
    pub quote_price_rate_wei: Handle<Wei>,
    pub base_price_rate_wei: Handle<Wei>,
    pub total_redeemable_balance_wei: Handle<Wei>,
    pub exchange_fee_rate_wei: Handle<Wei>,
    pub slippage_percent_wei: Handle<Wei>,
    pub transaction_fee_wei: Handle<Option<Wei>>,
    pub fee_cost_wei: Handle<Wei>,
    pub base_fee_rate_wei: Handle<Wei>,
    pub can_redeem: Handle<bool>,
    pub needs_approval: Handle<bool>,
    pub is_approved: Handle<bool>,
    pub is_approving: Handle<bool>,
    pub submission_disabled_reason: Handle<Option<DisabledReason>>,
    pub is_submission_disabled: Handle<bool>,
    pub exchange_rates_wei: Handle<HashMap<CurrencyKey, Wei>>,
    pub usd_rate_wei: Handle<Option<Wei>>,
    pub eth_rate: Handle<Wei>,
    pub total_trade_price: Handle<Wei>,
    pub estimated_base_trade_price: Handle<Wei>,
}

impl Default for ExchangeSelectors {
    fn default() -> Self {
        Self::new(Arc::new(NoCurrencyNames))
    }
}

impl ExchangeSelectors {
    #[allow(clippy::type_complexity)]
    pub fn new(currency_names: Arc<dyn CurrencyNames>) -> Self {
        let mut graph = Graph::new();

        // Raw state leaves
        let quote_amount = graph.input("quote_amount", |s: &Store| {
            s.exchange().quote_amount().to_owned()
        });
        let base_amount = graph.input("base_amount", |s: &Store| {
            s.exchange().base_amount().to_owned()
        });
        let quote_currency_key = graph.input("quote_currency_key", |s: &Store| {
            s.exchange().quote_currency_key().map(str::to_owned)
        });
        let base_currency_key = graph.input("base_currency_key", |s: &Store| {
            s.exchange().base_currency_key().map(str::to_owned)
        });
        let rate = graph.input("rate", |s: &Store| {
            s.exchange().rate().map(str::to_owned)
        });
        let quote_price_rate = graph.input("quote_price_rate", |s: &Store| {
            s.exchange().quote_price_rate().map(str::to_owned)
        });
        let base_price_rate = graph.input("base_price_rate", |s: &Store| {
            s.exchange().base_price_rate().map(str::to_owned)
        });
        let exchange_fee_rate = graph.input("exchange_fee_rate", |s: &Store| {
            s.exchange().exchange_fee_rate().map(str::to_owned)
        });
        let slippage_percent = graph.input("slippage_percent", |s: &Store| {
            s.exchange().slippage_percent().map(str::to_owned)
        });
        let base_fee_rate = graph.input("base_fee_rate", |s: &Store| {
            s.exchange().base_fee_rate().map(str::to_owned)
        });
        let transaction_fee = graph.input("transaction_fee", |s: &Store| {
            s.exchange().transaction_fee().map(str::to_owned)
        });
        let fee_cost = graph.input("fee_cost", |s: &Store| {
            s.exchange().fee_cost().map(str::to_owned)
        });
        let allowance = graph.input("allowance", |s: &Store| {
            s.exchange().allowance().map(str::to_owned)
        });
        let total_redeemable_balance = graph.input("total_redeemable_balance", |s: &Store| {
            s.exchange().total_redeemable_balance().map(str::to_owned)
        });
        let exchange_rates = graph.input("exchange_rates", |s: &Store| {
            s.exchange().exchange_rates().clone()
        });
        let tx_provider = graph.input("tx_provider", |s: &Store| s.exchange().tx_provider());
        let fee_reclaim_period = graph.input("fee_reclaim_period", |s: &Store| {
            s.exchange().fee_reclaim_period()
        });
        let is_submitting = graph.input("is_submitting", |s: &Store| s.exchange().is_submitting());
        let approval_status = graph.input("approval_status", |s: &Store| {
            s.exchange().approval_status()
        });
        let one_inch_quote_error = graph.input("one_inch_quote_error", |s: &Store| {
            s.exchange().one_inch_quote_error().map(str::to_owned)
        });
        let redeemable_synth_balances = graph.input("redeemable_synth_balances", |s: &Store| {
            s.exchange().redeemable_synth_balances().to_vec()
        });
        let quote_raw_balance = graph.input("quote_raw_balance", |s: &Store| {
            s.exchange()
                .quote_currency_key()
                .and_then(|key| s.balances().balance(key))
                .map(|b| b.balance().to_owned())
        });
        let base_raw_balance = graph.input("base_raw_balance", |s: &Store| {
            s.exchange()
                .base_currency_key()
                .and_then(|key| s.balances().balance(key))
                .map(|b| b.balance().to_owned())
        });
        let usd_balances = graph.input("usd_balances", |s: &Store| {
            s.balances()
                .balances_map()
                .iter()
                .filter_map(|(key, balance)| {
                    balance.usd_balance().map(|usd| (key.clone(), usd.to_owned()))
                })
                .collect::<HashMap<CurrencyKey, String>>()
        });
        let wallet_connected = graph.input("wallet_connected", |s: &Store| s.wallet().connected());

        // Fixed-point normalization
        let quote_amount_wei = graph.derived(
            "quote_amount_wei",
            (quote_amount,),
            |(amount,): (Arc<String>,)| Wei::from_dec_str(&amount),
        );
        let base_amount_wei = graph.derived(
            "base_amount_wei",
            (base_amount,),
            |(amount,): (Arc<String>,)| Wei::from_dec_str(&amount),
        );
        let rate_wei = graph.derived("rate_wei", (rate,), |(rate,): (Arc<Option<String>>,)| {
            Wei::from_opt(rate.as_deref())
        });
        let quote_price_rate_wei = graph.derived(
            "quote_price_rate_wei",
            (quote_price_rate,),
            |(rate,): (Arc<Option<String>>,)| Wei::from_opt(rate.as_deref()),
        );
        let base_price_rate_wei = graph.derived(
            "base_price_rate_wei",
            (base_price_rate,),
            |(rate,): (Arc<Option<String>>,)| Wei::from_opt(rate.as_deref()),
        );
        let exchange_fee_rate_wei = graph.derived(
            "exchange_fee_rate_wei",
            (exchange_fee_rate,),
            |(rate,): (Arc<Option<String>>,)| Wei::from_opt(rate.as_deref()),
        );
        let slippage_percent_wei = graph.derived(
            "slippage_percent_wei",
            (slippage_percent,),
            |(percent,): (Arc<Option<String>>,)| Wei::from_opt(percent.as_deref()),
        );
        let base_fee_rate_wei = graph.derived(
            "base_fee_rate_wei",
            (base_fee_rate,),
            |(rate,): (Arc<Option<String>>,)| Wei::from_opt(rate.as_deref()),
        );
        let transaction_fee_wei = graph.derived(
            "transaction_fee_wei",
            (transaction_fee,),
            |(fee,): (Arc<Option<String>>,)| fee.as_deref().map(Wei::from_dec_str),
        );
        let fee_cost_wei = graph.derived(
            "fee_cost_wei",
            (fee_cost,),
            |(fee,): (Arc<Option<String>>,)| Wei::from_opt(fee.as_deref()),
        );
        let total_redeemable_balance_wei = graph.derived(
            "total_redeemable_balance_wei",
            (total_redeemable_balance,),
            |(total,): (Arc<Option<String>>,)| Wei::from_opt(total.as_deref()),
        );
        let quote_balance_wei = graph.derived(
            "quote_balance_wei",
            (quote_raw_balance,),
            |(balance,): (Arc<Option<String>>,)| Wei::from_opt(balance.as_deref()),
        );
        let base_balance_wei = graph.derived(
            "base_balance_wei",
            (base_raw_balance,),
            |(balance,): (Arc<Option<String>>,)| Wei::from_opt(balance.as_deref()),
        );

        // Pair selection and currency metadata
        let both_sides_selected = graph.derived(
            "both_sides_selected",
            (quote_currency_key, base_currency_key),
            |(quote, base): (Arc<Option<String>>, Arc<Option<String>>)| {
                quote.is_some() && base.is_some()
            },
        );
        let names = Arc::clone(&currency_names);
        let quote_currency_name = graph.derived(
            "quote_currency_name",
            (quote_currency_key,),
            move |(key,): (Arc<Option<String>>,)| {
                key.as_deref().and_then(|key| names.currency_name(key))
            },
        );
        let names = Arc::clone(&currency_names);
        let base_currency_name = graph.derived(
            "base_currency_name",
            (base_currency_key,),
            move |(key,): (Arc<Option<String>>,)| {
                key.as_deref().and_then(|key| names.currency_name(key))
            },
        );

        // Rates
        let inverse_rate = graph.derived("inverse_rate", (rate_wei,), |(rate,): (Arc<Wei>,)| {
            if rate.is_positive() {
                Wei::ONE.checked_div(*rate).unwrap_or(Wei::ZERO)
            } else {
                Wei::ZERO
            }
        });
        let exchange_rates_wei = graph.derived(
            "exchange_rates_wei",
            (exchange_rates,),
            |(rates,): (Arc<HashMap<CurrencyKey, String>>,)| {
                rates
                    .iter()
                    .map(|(key, rate)| (key.clone(), Wei::from_dec_str(rate)))
                    .collect::<HashMap<CurrencyKey, Wei>>()
            },
        );
        let usd_rate_wei = graph.derived(
            "usd_rate_wei",
            (exchange_rates_wei,),
            |(rates,): (Arc<HashMap<CurrencyKey, Wei>>,)| rates.get(types::USD_KEY).copied(),
        );
        let eth_rate = graph.derived(
            "eth_rate",
            (exchange_rates_wei,),
            |(rates,): (Arc<HashMap<CurrencyKey, Wei>>,)| {
                pair_rate(&rates, types::ETH_SYNTH_KEY, types::USD_KEY)
            },
        );

        // Balances
        let insufficient_balance = graph.derived(
            "insufficient_balance",
            (quote_amount_wei, quote_balance_wei),
            |(amount, balance): (Arc<Wei>, Arc<Wei>)| *amount > *balance,
        );
        let total_usd_balance = graph.derived(
            "total_usd_balance",
            (usd_balances,),
            |(balances,): (Arc<HashMap<CurrencyKey, String>>,)| {
                balances
                    .values()
                    .fold(Wei::ZERO, |acc, usd| acc + Wei::from_dec_str(usd))
            },
        );
        let no_synths = graph.derived(
            "no_synths",
            (total_usd_balance,),
            |(total,): (Arc<Wei>,)| !total.is_positive(),
        );

        // Approval and redemption
        let show_fee = graph.derived("show_fee", (tx_provider,), |(provider,): (Arc<TxProvider>,)| {
            *provider == TxProvider::Synthetix
        });
        let needs_approval = graph.derived(
            "needs_approval",
            (tx_provider, quote_currency_key),
            |(provider, quote): (Arc<TxProvider>, Arc<Option<String>>)| {
                let quote_is_eth = quote.as_deref() == Some(types::NATIVE_ETH_KEY);
                matches!(*provider, TxProvider::OneInch | TxProvider::Synthswap) && !quote_is_eth
            },
        );
        let is_approved = graph.derived(
            "is_approved",
            (needs_approval, allowance, quote_amount_wei),
            |(needs, allowance, amount): (Arc<bool>, Arc<Option<String>>, Arc<Wei>)| {
                if *needs {
                    Wei::from_opt(allowance.as_deref()) >= *amount
                } else {
                    true
                }
            },
        );
        let is_approving = graph.derived(
            "is_approving",
            (approval_status,),
            |(status,): (Arc<FetchStatus>,)| *status == FetchStatus::Loading,
        );
        let can_redeem = graph.derived(
            "can_redeem",
            (total_redeemable_balance_wei, redeemable_synth_balances),
            |(total, balances): (Arc<Wei>, Arc<Vec<SynthBalance>>)| {
                total.is_positive() && !balances.is_empty()
            },
        );

        // Submission eligibility: first-match priority chain, ordered from
        // most to least operationally significant
        let submission_disabled_reason = graph.derived(
            "submission_disabled_reason",
            (
                tx_provider,
                fee_reclaim_period,
                both_sides_selected,
                insufficient_balance,
                is_submitting,
                is_approving,
                one_inch_quote_error,
                wallet_connected,
                base_amount_wei,
                quote_amount_wei,
            ),
            |(
                provider,
                fee_reclaim_period,
                both_sides_selected,
                insufficient_balance,
                is_submitting,
                is_approving,
                one_inch_quote_error,
                wallet_connected,
                base_amount,
                quote_amount,
            ): (
                Arc<TxProvider>,
                Arc<u64>,
                Arc<bool>,
                Arc<bool>,
                Arc<bool>,
                Arc<bool>,
                Arc<Option<String>>,
                Arc<bool>,
                Arc<Wei>,
                Arc<Wei>,
            )| {
                if *fee_reclaim_period > 0 {
                    return Some(DisabledReason::FeeReclaimPeriod);
                }
                if !*both_sides_selected {
                    return Some(if *provider == TxProvider::OneInch {
                        DisabledReason::SelectToken
                    } else {
                        DisabledReason::SelectSynth
                    });
                }
                if *insufficient_balance {
                    return Some(DisabledReason::InsufficientBalance);
                }
                if *is_submitting {
                    return Some(DisabledReason::SubmittingOrder);
                }
                if *is_approving {
                    return Some(DisabledReason::Approving);
                }
                if one_inch_quote_error.is_some() {
                    return Some(DisabledReason::InsufficientLiquidity);
                }
                if !*wallet_connected || !base_amount.is_positive() || !quote_amount.is_positive() {
                    return Some(DisabledReason::EnterAmount);
                }
                None
            },
        );
        let is_submission_disabled = graph.derived(
            "is_submission_disabled",
            (submission_disabled_reason,),
            |(reason,): (Arc<Option<DisabledReason>>,)| reason.is_some(),
        );

        // Trade pricing: product stays in native-price terms when no USD
        // rate is available; division is skipped, not zeroed
        let total_trade_price = graph.derived(
            "total_trade_price",
            (quote_amount_wei, quote_price_rate_wei, usd_rate_wei),
            |(amount, price_rate, usd_rate): (Arc<Wei>, Arc<Wei>, Arc<Option<Wei>>)| {
                let price = *amount * *price_rate;
                usd_rate
                    .and_then(|usd| price.checked_div(usd))
                    .unwrap_or(price)
            },
        );
        let estimated_base_trade_price = graph.derived(
            "estimated_base_trade_price",
            (base_amount_wei, base_price_rate_wei, usd_rate_wei),
            |(amount, price_rate, usd_rate): (Arc<Wei>, Arc<Wei>, Arc<Option<Wei>>)| {
                let price = *amount * *price_rate;
                usd_rate
                    .and_then(|usd| price.checked_div(usd))
                    .unwrap_or(price)
            },
        );

        Self {
            graph,
            quote_amount_wei,
            base_amount_wei,
            both_sides_selected,
            quote_currency_name,
            base_currency_name,
            total_usd_balance,
            no_synths,
            show_fee,
            rate_wei,
            inverse_rate,
            quote_balance_wei,
            base_balance_wei,
            insufficient_balance,
            quote_price_rate_wei,
            base_price_rate_wei,
            total_redeemable_balance_wei,
            exchange_fee_rate_wei,
            slippage_percent_wei,
            transaction_fee_wei,
            fee_cost_wei,
            base_fee_rate_wei,
            can_redeem,
            needs_approval,
            is_approved,
            is_approving,
            submission_disabled_reason,
            is_submission_disabled,
            exchange_rates_wei,
            usd_rate_wei,
            eth_rate,
            total_trade_price,
            estimated_base_trade_price,
        }
    }

    /// Runs one synchronous selector pass over the snapshot.
    pub fn evaluate(&mut self, store: &Store) {
        self.graph.evaluate(store);
    }

    /// Memoized value of a selector.
    ///
    /// # Panics
    ///
    /// If called before [`Self::evaluate`].
    pub fn get<T: Send + Sync + 'static>(&self, handle: Handle<T>) -> Arc<T> {
        self.graph.get(handle)
    }

    /// Name-to-value mapping of the last pass.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, crate::graph::DynValue)> + '_ {
        self.graph.values()
    }
}
