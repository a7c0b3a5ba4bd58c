use std::sync::Arc;

use exchange_state::{
    num::Wei,
    select::ExchangeSelectors,
    state::{ExchangeAction, Store, WalletAction},
    testing::StoreBuilder,
};

/// Tests that a full selector pass over an unchanged snapshot hands out the
/// identical instance for every selector in the set.
#[test]
fn test_identity_preserved_across_identical_snapshots() {
    let store = StoreBuilder::new()
        .pair("sUSD", "sETH")
        .quote_amount("150")
        .base_amount("0.075")
        .rate("0.0005")
        .exchange_rate("sUSD", "1")
        .exchange_rate("sETH", "2000")
        .synth_balance("sUSD", "500", Some("500"))
        .wallet_connected()
        .build();

    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(&store);
    let first: Vec<_> = selectors.values().map(|(name, value)| (name, value)).collect();

    // A cloned snapshot carries equal raw values, so no selector may move
    selectors.evaluate(&store.clone());
    for (name, value) in selectors.values() {
        let (_, before) = first
            .iter()
            .find(|(n, _)| *n == name)
            .unwrap_or_else(|| panic!("selector `{name}` disappeared between passes"));
        assert!(
            Arc::ptr_eq(before, &value),
            "selector `{name}` lost identity across identical snapshots"
        );
    }
}

/// Tests that an update only moves the selectors downstream of the changed
/// raw field; everything else keeps its instance.
#[test]
fn test_update_moves_only_downstream_selectors() {
    let store = StoreBuilder::new()
        .pair("sUSD", "sETH")
        .quote_amount("150")
        .rate("0.0005")
        .synth_balance("sUSD", "500", None)
        .wallet_connected()
        .build();

    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(&store);
    let rate = selectors.get(selectors.rate_wei);
    let inverse = selectors.get(selectors.inverse_rate);
    let amount = selectors.get(selectors.quote_amount_wei);
    let insufficient = selectors.get(selectors.insufficient_balance);

    let next = store.apply(ExchangeAction::SetQuoteAmount("600".into()));
    selectors.evaluate(&next);

    // Rate chain untouched
    assert!(Arc::ptr_eq(&rate, &selectors.get(selectors.rate_wei)));
    assert!(Arc::ptr_eq(&inverse, &selectors.get(selectors.inverse_rate)));

    // Amount chain recomputed, and with the new values
    assert!(!Arc::ptr_eq(&amount, &selectors.get(selectors.quote_amount_wei)));
    assert_eq!(
        *selectors.get(selectors.quote_amount_wei),
        Wei::from_dec_str("600")
    );
    assert!(!Arc::ptr_eq(
        &insufficient,
        &selectors.get(selectors.insufficient_balance)
    ));
    assert!(*selectors.get(selectors.insufficient_balance));
}

/// Tests that a derived selector whose dependencies recompute to equal
/// values keeps its instance (the cut-off below an unchanged intermediate).
#[test]
fn test_equal_recomputation_keeps_downstream_identity() {
    let store = StoreBuilder::new()
        .pair("sUSD", "sETH")
        .quote_amount("10")
        .build();

    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(&store);
    let both = selectors.get(selectors.both_sides_selected);

    // Re-selecting the same base key produces an equal raw value; the input
    // dedups it and both_sides_selected never recomputes
    let next = store.apply(ExchangeAction::SetBaseCurrencyKey(Some("sETH".into())));
    selectors.evaluate(&next);
    assert!(Arc::ptr_eq(
        &both,
        &selectors.get(selectors.both_sides_selected)
    ));
}

/// Tests that wallet-only updates leave every exchange selector in place.
#[test]
fn test_wallet_flags_do_not_disturb_pricing() {
    let store = StoreBuilder::new()
        .pair("sUSD", "sETH")
        .quote_amount("10")
        .quote_price_rate("2000")
        .exchange_rate("sUSD", "1")
        .build();

    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(&store);
    let price = selectors.get(selectors.total_trade_price);
    assert_eq!(*price, Wei::from_dec_str("20000"));

    let next = store
        .apply(WalletAction::SetAppReady(true))
        .apply(WalletAction::SetLayer2(true));
    selectors.evaluate(&next);
    assert!(Arc::ptr_eq(&price, &selectors.get(selectors.total_trade_price)));
}

/// Tests that a fresh store evaluates cleanly end to end with every selector
/// resolving to its documented empty-state value.
#[test]
fn test_empty_store_defaults() {
    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(&Store::new());

    assert_eq!(*selectors.get(selectors.quote_amount_wei), Wei::ZERO);
    assert_eq!(*selectors.get(selectors.rate_wei), Wei::ZERO);
    assert_eq!(*selectors.get(selectors.inverse_rate), Wei::ZERO);
    assert!(!*selectors.get(selectors.both_sides_selected));
    assert!(*selectors.get(selectors.no_synths));
    assert_eq!(*selectors.get(selectors.usd_rate_wei), None);
    assert_eq!(*selectors.get(selectors.transaction_fee_wei), None);
    assert!(!*selectors.get(selectors.can_redeem));
    assert!(*selectors.get(selectors.is_approved));
    assert!(*selectors.get(selectors.is_submission_disabled));
}
