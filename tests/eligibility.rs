use exchange_state::{
    select::ExchangeSelectors,
    state::{ExchangeAction, Store, WalletAction},
    testing::StoreBuilder,
    types::{DisabledReason, TxProvider},
};

fn reason(store: &Store) -> Option<DisabledReason> {
    let mut selectors = ExchangeSelectors::default();
    selectors.evaluate(store);
    *selectors.get(selectors.submission_disabled_reason)
}

fn ready_store() -> Store {
    StoreBuilder::new()
        .pair("sUSD", "sETH")
        .quote_amount("100")
        .base_amount("0.05")
        .synth_balance("sUSD", "500", None)
        .wallet_connected()
        .build()
}

/// Tests that a fully prepared trade has no disabled reason.
#[test]
fn test_ready_trade_is_enabled() {
    assert_eq!(reason(&ready_store()), None);
}

/// Tests the whole precedence order of the eligibility chain by stacking
/// every failure condition and peeling them off strongest-first.
#[test]
fn test_precedence_peels_off_in_order() {
    let store = ready_store()
        .apply(ExchangeAction::SetFeeReclaimPeriod(90))
        .apply(ExchangeAction::SetQuoteAmount("10000".into()))
        .apply(ExchangeAction::SetSubmitting(true))
        .apply(ExchangeAction::SetApprovalStatus(
            exchange_state::types::FetchStatus::Loading,
        ))
        .apply(ExchangeAction::SetOneInchQuoteError(Some("thin".into())));

    assert_eq!(reason(&store), Some(DisabledReason::FeeReclaimPeriod));

    let store = store.apply(ExchangeAction::SetFeeReclaimPeriod(0));
    assert_eq!(reason(&store), Some(DisabledReason::InsufficientBalance));

    let store = store.apply(ExchangeAction::SetQuoteAmount("100".into()));
    assert_eq!(reason(&store), Some(DisabledReason::SubmittingOrder));

    let store = store.apply(ExchangeAction::SetSubmitting(false));
    assert_eq!(reason(&store), Some(DisabledReason::Approving));

    let store = store.apply(ExchangeAction::SetApprovalStatus(
        exchange_state::types::FetchStatus::Success,
    ));
    assert_eq!(reason(&store), Some(DisabledReason::InsufficientLiquidity));

    let store = store.apply(ExchangeAction::SetOneInchQuoteError(None));
    assert_eq!(reason(&store), None);
}

/// Tests that the missing-pair reason names tokens or synths depending on
/// the transaction provider.
#[test]
fn test_missing_pair_reason_follows_provider() {
    let store = StoreBuilder::new().wallet_connected().build();
    assert_eq!(reason(&store), Some(DisabledReason::SelectSynth));

    let store = store.apply(ExchangeAction::SetTxProvider(TxProvider::OneInch));
    assert_eq!(reason(&store), Some(DisabledReason::SelectToken));

    let store = store.apply(ExchangeAction::SetTxProvider(TxProvider::Synthswap));
    assert_eq!(reason(&store), Some(DisabledReason::SelectSynth));
}

/// Tests that zero amounts and a disconnected wallet both collapse into the
/// prompt to enter an amount.
#[test]
fn test_enter_amount_covers_disconnect_and_zero_amounts() {
    let store = ready_store().apply(WalletAction::SetConnected(false));
    assert_eq!(reason(&store), Some(DisabledReason::EnterAmount));

    let store = ready_store().apply(ExchangeAction::SetBaseAmount("0".into()));
    assert_eq!(reason(&store), Some(DisabledReason::EnterAmount));

    let store = ready_store().apply(ExchangeAction::SetQuoteAmount("".into()));
    // An emptied quote amount also reads as insufficient only if above
    // balance; empty parses to zero, so the prompt wins
    assert_eq!(reason(&store), Some(DisabledReason::EnterAmount));
}

/// Tests that every reason maps to a distinct translation key.
#[test]
fn test_reason_message_keys_are_distinct() {
    let reasons = [
        DisabledReason::FeeReclaimPeriod,
        DisabledReason::SelectToken,
        DisabledReason::SelectSynth,
        DisabledReason::InsufficientBalance,
        DisabledReason::SubmittingOrder,
        DisabledReason::Approving,
        DisabledReason::InsufficientLiquidity,
        DisabledReason::EnterAmount,
    ];
    for (i, a) in reasons.iter().enumerate() {
        assert!(a.message_key().starts_with("exchange.summary-info.button."));
        for b in reasons.iter().skip(i + 1) {
            assert_ne!(a.message_key(), b.message_key());
        }
    }
}
