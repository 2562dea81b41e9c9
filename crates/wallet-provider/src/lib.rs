//! wallet-provider: Wallet provider interface for Chronofi
//!
//! Abstracts the injected browser wallet (or its mock substitute) behind an
//! async trait: account requests, chain id lookup, balance queries, and a
//! typed event subscription for account and chain change notifications.
//!
//! The session machine consumes these events from a channel rather than
//! registering callbacks, so event ordering is explicit and subscriptions
//! are released by dropping the receiver.

pub mod mock;

use async_trait::async_trait;
use chronofi_core::{Address, ChainId, WalletError};
use tokio::sync::mpsc;

pub use mock::{MockProvider, NoProvider};

/// Notifications pushed by the wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The selected account set changed; empty means the user disconnected
    /// from the wallet side
    AccountsChanged(Vec<Address>),
    /// The wallet switched to a different chain
    ChainChanged(ChainId),
    /// The provider dropped the connection entirely
    Disconnected,
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Injected wallet provider (browser extension or mock substitute)
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Prompt the wallet for its accounts; the first entry is the active
    /// account. May take unbounded time (user interaction).
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Chain id the wallet is currently on
    async fn chain_id(&self) -> Result<ChainId>;

    /// Balance for an address as a decimal string in chronons
    async fn get_balance(&self, address: &Address) -> Result<String>;

    /// Subscribe to provider notifications. Dropping the receiver
    /// unsubscribes it.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ProviderEvent>;
}
