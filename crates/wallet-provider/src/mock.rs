//! Mock wallet providers
//!
//! [`MockProvider`] stands in for the injected browser extension in tests
//! and the dev harness: accounts, chain and balances are plain in-memory
//! state, and every mutator broadcasts the matching [`ProviderEvent`] to
//! all live subscribers. [`NoProvider`] models an execution environment
//! with no wallet installed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chronofi_core::{Address, ChainId, WalletError};
use tokio::sync::mpsc;

use crate::{ProviderEvent, Result, WalletProvider};

struct MockState {
    accounts: Vec<Address>,
    chain_id: ChainId,
    /// Balances keyed by normalized address
    balances: HashMap<String, String>,
    /// When set, account requests fail with this error until cleared
    failure: Option<WalletError>,
    /// Artificial delay before responding, for in-flight cancellation tests
    latency: Option<Duration>,
}

/// Scriptable in-memory wallet provider
pub struct MockProvider {
    state: Mutex<MockState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ProviderEvent>>>,
}

impl MockProvider {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            state: Mutex::new(MockState {
                accounts: Vec::new(),
                chain_id,
                balances: HashMap::new(),
                failure: None,
                latency: None,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Builder: add an account with a balance
    pub fn with_account(self, address: Address, balance: impl Into<String>) -> Self {
        {
            let mut state = self.state.lock().expect("mock state lock poisoned");
            state
                .balances
                .insert(address.normalized(), balance.into());
            state.accounts.push(address);
        }
        self
    }

    /// Replace the account list and notify subscribers
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        {
            let mut state = self.state.lock().expect("mock state lock poisoned");
            state.accounts = accounts.clone();
        }
        self.broadcast(ProviderEvent::AccountsChanged(accounts));
    }

    /// Switch chains and notify subscribers
    pub fn set_chain(&self, chain_id: ChainId) {
        {
            let mut state = self.state.lock().expect("mock state lock poisoned");
            state.chain_id = chain_id;
        }
        self.broadcast(ProviderEvent::ChainChanged(chain_id));
    }

    pub fn set_balance(&self, address: &Address, balance: impl Into<String>) {
        let mut state = self.state.lock().expect("mock state lock poisoned");
        state.balances.insert(address.normalized(), balance.into());
    }

    /// Make account requests fail until cleared with `None`
    pub fn set_failure(&self, failure: Option<WalletError>) {
        let mut state = self.state.lock().expect("mock state lock poisoned");
        state.failure = failure;
    }

    /// Delay every provider call, so tests can disconnect mid-connect
    pub fn set_latency(&self, latency: Option<Duration>) {
        let mut state = self.state.lock().expect("mock state lock poisoned");
        state.latency = latency;
    }

    /// Notify subscribers that the provider dropped the connection
    pub fn emit_disconnect(&self) {
        self.broadcast(ProviderEvent::Disconnected);
    }

    /// Live subscriber count after pruning closed channels
    pub fn subscriber_count(&self) -> usize {
        let mut subs = self.subscribers.lock().expect("subscriber lock poisoned");
        subs.retain(|tx| !tx.is_closed());
        subs.len()
    }

    fn broadcast(&self, event: ProviderEvent) {
        let mut subs = self.subscribers.lock().expect("subscriber lock poisoned");
        subs.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::debug!("Broadcast {:?} to {} subscriber(s)", event, subs.len());
    }

    async fn simulate_latency(&self) {
        let latency = {
            let state = self.state.lock().expect("mock state lock poisoned");
            state.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.simulate_latency().await;
        let state = self.state.lock().expect("mock state lock poisoned");
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(state.accounts.clone()),
        }
    }

    async fn chain_id(&self) -> Result<ChainId> {
        self.simulate_latency().await;
        let state = self.state.lock().expect("mock state lock poisoned");
        Ok(state.chain_id)
    }

    async fn get_balance(&self, address: &Address) -> Result<String> {
        self.simulate_latency().await;
        let state = self.state.lock().expect("mock state lock poisoned");
        state
            .balances
            .get(&address.normalized())
            .cloned()
            .ok_or_else(|| WalletError::Provider(format!("unknown address {}", address)))
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<ProviderEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subs = self.subscribers.lock().expect("subscriber lock poisoned");
        subs.retain(|s| !s.is_closed());
        subs.push(tx);
        rx
    }
}

/// Provider for environments with no wallet installed: every call fails
/// with [`WalletError::ProviderUnavailable`] and no events are ever sent.
#[derive(Debug, Default)]
pub struct NoProvider;

#[async_trait]
impl WalletProvider for NoProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Err(WalletError::ProviderUnavailable)
    }

    async fn chain_id(&self) -> Result<ChainId> {
        Err(WalletError::ProviderUnavailable)
    }

    async fn get_balance(&self, _address: &Address) -> Result<String> {
        Err(WalletError::ProviderUnavailable)
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<ProviderEvent> {
        let (_tx, rx) = mpsc::unbounded_channel();
        rx
    }
}
