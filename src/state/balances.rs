use std::collections::HashMap;

use crate::types::CurrencyKey;

/// Balance record for a single currency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynthBalance {
    balance: String,
    usd_balance: Option<String>,
}

impl SynthBalance {
    pub fn new(balance: impl Into<String>, usd_balance: Option<String>) -> Self {
        Self {
            balance: balance.into(),
            usd_balance,
        }
    }

    /// Balance in the currency's own denomination, as a decimal string.
    pub fn balance(&self) -> &str {
        &self.balance
    }

    /// USD value of the balance, if the rates source reported one.
    pub fn usd_balance(&self) -> Option<&str> {
        self.usd_balance.as_deref()
    }
}

/// Wallet balances, read-only from the selector graph's perspective.
///
/// `balances_map` holds synth balances; `token_balances` is the fallback
/// table for currencies absent from the primary map (plain ERC-20 tokens
/// quoted through an aggregator).
#[derive(Clone, Debug, Default)]
pub struct BalancesState {
    balances_map: HashMap<CurrencyKey, SynthBalance>,
    token_balances: HashMap<CurrencyKey, SynthBalance>,
}

/// Mutations of the balances sub-state.
#[derive(Clone, Debug)]
pub enum BalancesAction {
    SetBalancesMap(HashMap<CurrencyKey, SynthBalance>),
    SetTokenBalances(HashMap<CurrencyKey, SynthBalance>),
}

impl BalancesState {
    pub fn balances_map(&self) -> &HashMap<CurrencyKey, SynthBalance> {
        &self.balances_map
    }

    pub fn token_balances(&self) -> &HashMap<CurrencyKey, SynthBalance> {
        &self.token_balances
    }

    /// Looks up a balance by currency key, primary map first, then the
    /// token-balance fallback.
    pub fn balance(&self, key: &str) -> Option<&SynthBalance> {
        self.balances_map
            .get(key)
            .or_else(|| self.token_balances.get(key))
    }

    pub(crate) fn reduce(&mut self, action: BalancesAction) {
        match action {
            BalancesAction::SetBalancesMap(v) => self.balances_map = v,
            BalancesAction::SetTokenBalances(v) => self.token_balances = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_lookup_prefers_primary_map() {
        let mut state = BalancesState::default();
        state.reduce(BalancesAction::SetBalancesMap(HashMap::from([(
            "sETH".to_string(),
            SynthBalance::new("2", None),
        )])));
        state.reduce(BalancesAction::SetTokenBalances(HashMap::from([
            ("sETH".to_string(), SynthBalance::new("9", None)),
            ("UNI".to_string(), SynthBalance::new("30", None)),
        ])));

        assert_eq!(state.balance("sETH").map(SynthBalance::balance), Some("2"));
        assert_eq!(state.balance("UNI").map(SynthBalance::balance), Some("30"));
        assert_eq!(state.balance("sBTC"), None);
    }
}
