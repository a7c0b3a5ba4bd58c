/// Wallet connectivity flags supplied by the external wallet collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalletState {
    connected: bool,
    app_ready: bool,
    layer2: bool,
}

/// Mutations of the wallet sub-state.
#[derive(Clone, Copy, Debug)]
pub enum WalletAction {
    SetConnected(bool),
    SetAppReady(bool),
    SetLayer2(bool),
}

impl WalletState {
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn app_ready(&self) -> bool {
        self.app_ready
    }

    pub fn layer2(&self) -> bool {
        self.layer2
    }

    /// Whether the polling queries should run: a connected wallet must also
    /// be on L2 with the app ready, a disconnected one only needs the app.
    pub fn query_ready(&self) -> bool {
        if self.connected {
            self.layer2 && self.app_ready
        } else {
            self.app_ready
        }
    }

    pub(crate) fn reduce(&mut self, action: WalletAction) {
        match action {
            WalletAction::SetConnected(v) => self.connected = v,
            WalletAction::SetAppReady(v) => self.app_ready = v,
            WalletAction::SetLayer2(v) => self.layer2 = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_readiness_gating() {
        let mut wallet = WalletState::default();
        assert!(!wallet.query_ready());

        wallet.reduce(WalletAction::SetAppReady(true));
        assert!(wallet.query_ready());

        wallet.reduce(WalletAction::SetConnected(true));
        assert!(!wallet.query_ready());

        wallet.reduce(WalletAction::SetLayer2(true));
        assert!(wallet.query_ready());
    }
}
