//! Session transition logic
//!
//! Pure state machine for the wallet connection lifecycle. No I/O, no
//! async - just deterministic transitions.
//!
//! Every connect attempt carries an epoch. Disconnecting or starting a new
//! attempt bumps the epoch, and a provider result tagged with a stale
//! epoch is discarded instead of applied. That is the whole cancellation
//! story: in-flight work is never interrupted, its result just stops
//! mattering.

use chronofi_core::{Address, ChainId, Environment, WalletError};
use serde::{Deserialize, Serialize};
use wallet_provider::ProviderEvent;

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Snapshot of the wallet session, shaped for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: Option<Address>,
    pub chain_id: Option<ChainId>,
    /// Balance in chronons as a decimal string, provider-native; the
    /// session never parses it
    pub balance: Option<String>,
    pub connection_state: ConnectionState,
    pub error: Option<String>,
    pub is_admin: bool,
    /// Whether the connected chain is in the supported set; None while no
    /// chain is known. Consumers prompt a network switch on Some(false).
    pub network_supported: Option<bool>,
}

impl WalletInfo {
    fn disconnected() -> Self {
        Self {
            address: None,
            chain_id: None,
            balance: None,
            connection_state: ConnectionState::Disconnected,
            error: None,
            is_admin: false,
            network_supported: None,
        }
    }
}

/// Inputs consumed by the machine
#[derive(Debug, Clone)]
pub enum SessionInput {
    /// Explicit connect request from the caller
    ConnectRequested,
    /// Explicit disconnect request from the caller
    DisconnectRequested,
    /// Provider returned accounts and a chain id for the tagged attempt
    ConnectSucceeded {
        epoch: u64,
        accounts: Vec<Address>,
        chain_id: ChainId,
    },
    /// Provider failed the tagged attempt
    ConnectFailed { epoch: u64, error: WalletError },
    /// Balance fetch for the tagged attempt completed
    BalanceFetched {
        epoch: u64,
        address: Address,
        balance: String,
    },
    /// Notification from the provider subscription
    Provider(ProviderEvent),
}

/// Side effects the driver must execute after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Ask the provider for accounts and chain id, reporting back with
    /// this epoch
    BeginConnect { epoch: u64 },
    /// Fetch the balance for the connected address
    FetchBalance { epoch: u64, address: Address },
    /// Persist the was-connected flag
    PersistConnected,
    /// Remove the was-connected flag
    ClearPersisted,
}

/// Wallet session state machine
#[derive(Debug)]
pub struct SessionMachine {
    env: Environment,
    info: WalletInfo,
    epoch: u64,
}

impl SessionMachine {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            info: WalletInfo::disconnected(),
            epoch: 0,
        }
    }

    /// Current snapshot
    pub fn info(&self) -> &WalletInfo {
        &self.info
    }

    /// Epoch of the newest connect attempt
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply one input, returning the effects the driver must run
    pub fn apply(&mut self, input: SessionInput) -> Vec<SessionEffect> {
        match input {
            SessionInput::ConnectRequested => match self.info.connection_state {
                // Already connected or mid-attempt: no-op, so event
                // subscriptions and connect attempts never duplicate
                ConnectionState::Connected | ConnectionState::Connecting => Vec::new(),
                ConnectionState::Disconnected | ConnectionState::Error => self.start_connect(),
            },
            SessionInput::DisconnectRequested => self.reset_disconnected(),
            SessionInput::ConnectSucceeded {
                epoch,
                accounts,
                chain_id,
            } => {
                if self.is_stale(epoch) {
                    return Vec::new();
                }
                match accounts.into_iter().next() {
                    None => {
                        self.fail(WalletError::Provider(
                            "wallet returned no accounts".to_string(),
                        ));
                        Vec::new()
                    }
                    Some(address) => self.complete_connect(epoch, address, chain_id),
                }
            }
            SessionInput::ConnectFailed { epoch, error } => {
                if self.is_stale(epoch) {
                    return Vec::new();
                }
                self.fail(error);
                Vec::new()
            }
            SessionInput::BalanceFetched {
                epoch,
                address,
                balance,
            } => {
                // The address check matters: the account may have changed
                // between the fetch starting and finishing
                if epoch == self.epoch
                    && self.info.connection_state == ConnectionState::Connected
                    && self.info.address.as_ref() == Some(&address)
                {
                    self.info.balance = Some(balance);
                }
                Vec::new()
            }
            SessionInput::Provider(event) => self.apply_provider_event(event),
        }
    }

    fn apply_provider_event(&mut self, event: ProviderEvent) -> Vec<SessionEffect> {
        let active = matches!(
            self.info.connection_state,
            ConnectionState::Connected | ConnectionState::Connecting
        );
        match event {
            ProviderEvent::AccountsChanged(accounts) => {
                if !active {
                    // Never connected in this session; nothing to update
                    return Vec::new();
                }
                if accounts.is_empty() {
                    return self.reset_disconnected();
                }
                self.start_connect()
            }
            ProviderEvent::ChainChanged(_) => {
                if !active {
                    return Vec::new();
                }
                self.start_connect()
            }
            ProviderEvent::Disconnected => {
                if self.info.connection_state == ConnectionState::Disconnected {
                    return Vec::new();
                }
                self.reset_disconnected()
            }
        }
    }

    /// Begin a fresh connect attempt under a new epoch
    fn start_connect(&mut self) -> Vec<SessionEffect> {
        self.epoch += 1;
        self.info = WalletInfo {
            connection_state: ConnectionState::Connecting,
            ..WalletInfo::disconnected()
        };
        vec![SessionEffect::BeginConnect { epoch: self.epoch }]
    }

    fn complete_connect(
        &mut self,
        epoch: u64,
        address: Address,
        chain_id: ChainId,
    ) -> Vec<SessionEffect> {
        self.info.connection_state = ConnectionState::Connected;
        self.info.error = None;
        self.info.chain_id = Some(chain_id);
        self.info.network_supported = Some(self.env.is_chain_supported(chain_id));
        self.info.is_admin = self.env.is_admin(&address);
        self.info.address = Some(address.clone());
        vec![
            SessionEffect::FetchBalance { epoch, address },
            SessionEffect::PersistConnected,
        ]
    }

    fn fail(&mut self, error: WalletError) {
        self.info = WalletInfo {
            connection_state: ConnectionState::Error,
            error: Some(error.to_string()),
            ..WalletInfo::disconnected()
        };
    }

    fn reset_disconnected(&mut self) -> Vec<SessionEffect> {
        self.epoch += 1;
        self.info = WalletInfo::disconnected();
        vec![SessionEffect::ClearPersisted]
    }

    /// A result is stale when its attempt was superseded or the machine
    /// left the connecting state
    fn is_stale(&self, epoch: u64) -> bool {
        epoch != self.epoch || self.info.connection_state != ConnectionState::Connecting
    }
}
