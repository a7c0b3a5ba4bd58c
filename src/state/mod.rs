//! Raw application state and its pure reducer.
//!
//! [`Store`] is an immutable snapshot of every raw input field the selector
//! graph reads: exchange form fields and protocol-reported rates
//! ([`ExchangeState`]), wallet balances ([`BalancesState`]) and wallet
//! connectivity flags ([`WalletState`]).
//!
//! The store owns no derived values. Mutation goes through the pure reducer
//! [`Store::apply`], which consumes an [`Action`] and produces the next
//! snapshot; the current snapshot is never modified in place, so a snapshot
//! handed to [`crate::graph::Graph::evaluate`] stays stable for the whole
//! pass.

mod balances;
mod exchange;
mod wallet;

pub use balances::*;
pub use exchange::*;
pub use wallet::*;

/// Immutable snapshot of all raw state consumed by the selector graph.
#[derive(Clone, Debug, Default)]
pub struct Store {
    exchange: ExchangeState,
    balances: BalancesState,
    wallet: WalletState,
}

/// Mutation applied by the [`Store::apply`] reducer.
#[derive(Clone, Debug)]
pub enum Action {
    Exchange(ExchangeAction),
    Balances(BalancesAction),
    Wallet(WalletAction),
}

impl From<ExchangeAction> for Action {
    fn from(action: ExchangeAction) -> Self {
        Self::Exchange(action)
    }
}

impl From<BalancesAction> for Action {
    fn from(action: BalancesAction) -> Self {
        Self::Balances(action)
    }
}

impl From<WalletAction> for Action {
    fn from(action: WalletAction) -> Self {
        Self::Wallet(action)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchange(&self) -> &ExchangeState {
        &self.exchange
    }

    pub fn balances(&self) -> &BalancesState {
        &self.balances
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    /// Pure reducer: applies one action and returns the next snapshot.
    pub fn apply(&self, action: impl Into<Action>) -> Store {
        let mut next = self.clone();
        match action.into() {
            Action::Exchange(action) => next.exchange.reduce(action),
            Action::Balances(action) => next.balances.reduce(action),
            Action::Wallet(action) => next.wallet.reduce(action),
        }
        next
    }
}
