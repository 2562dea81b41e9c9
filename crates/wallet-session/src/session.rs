//! Session driver
//!
//! Owns a [`SessionMachine`] on a tokio task, feeding it caller commands,
//! provider notifications, and the completions of in-flight provider
//! calls. Each applied input publishes a fresh [`WalletInfo`] snapshot
//! through a watch channel.
//!
//! Connect and balance calls run on their own tasks, so a disconnect
//! issued while a connect is in flight is processed immediately; the late
//! result arrives tagged with a stale epoch and the machine drops it.

use std::sync::Arc;

use chronofi_core::{Address, ChainId, Environment, KvStore, WalletError};
use tokio::sync::{mpsc, watch};
use wallet_provider::{ProviderEvent, WalletProvider};

use crate::machine::{SessionEffect, SessionInput, SessionMachine, WalletInfo};

/// Store key for the reconnect-on-startup flag
pub const WAS_CONNECTED_KEY: &str = "chronofi.wallet.was_connected";

#[derive(Debug)]
enum Command {
    Connect,
    Disconnect,
    Shutdown,
}

/// Handle to a spawned wallet session
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    info: watch::Receiver<WalletInfo>,
}

impl SessionHandle {
    /// Request a connection; a no-op while connected or already connecting
    pub fn connect(&self) {
        let _ = self.commands.send(Command::Connect);
    }

    /// Request a disconnect from any state
    pub fn disconnect(&self) {
        let _ = self.commands.send(Command::Disconnect);
    }

    /// Stop the session task, releasing the provider subscription
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Latest published snapshot
    pub fn info(&self) -> WalletInfo {
        self.info.borrow().clone()
    }

    /// Watch snapshot updates as they are published
    pub fn watch(&self) -> watch::Receiver<WalletInfo> {
        self.info.clone()
    }
}

/// Spawns and wires wallet session tasks
pub struct WalletSession;

impl WalletSession {
    /// Spawn the session task.
    ///
    /// If the was-connected flag is present in the store, an automatic
    /// reconnect is issued before any caller command is processed.
    pub fn spawn(
        env: Environment,
        provider: Arc<dyn WalletProvider>,
        store: Arc<dyn KvStore>,
    ) -> SessionHandle {
        let machine = SessionMachine::new(env);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (info_tx, info_rx) = watch::channel(machine.info().clone());
        let events = provider.subscribe();
        let resume = store.get(WAS_CONNECTED_KEY).is_some();

        tokio::spawn(run_loop(
            machine, provider, store, command_rx, events, info_tx, resume,
        ));

        SessionHandle {
            commands: command_tx,
            info: info_rx,
        }
    }
}

async fn run_loop(
    mut machine: SessionMachine,
    provider: Arc<dyn WalletProvider>,
    store: Arc<dyn KvStore>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut events: mpsc::UnboundedReceiver<ProviderEvent>,
    info_tx: watch::Sender<WalletInfo>,
    resume: bool,
) {
    // Completions of spawned provider calls come back through this channel
    let (result_tx, mut results) = mpsc::unbounded_channel::<SessionInput>();

    if resume {
        tracing::info!("Restoring previous wallet session");
        step(
            &mut machine,
            SessionInput::ConnectRequested,
            &provider,
            &store,
            &result_tx,
            &info_tx,
        );
    }

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Connect) => step(
                    &mut machine,
                    SessionInput::ConnectRequested,
                    &provider,
                    &store,
                    &result_tx,
                    &info_tx,
                ),
                Some(Command::Disconnect) => step(
                    &mut machine,
                    SessionInput::DisconnectRequested,
                    &provider,
                    &store,
                    &result_tx,
                    &info_tx,
                ),
                // Dropping the last handle tears the session down too
                Some(Command::Shutdown) | None => break,
            },
            Some(event) = events.recv() => step(
                &mut machine,
                SessionInput::Provider(event),
                &provider,
                &store,
                &result_tx,
                &info_tx,
            ),
            Some(input) = results.recv() => step(
                &mut machine,
                input,
                &provider,
                &store,
                &result_tx,
                &info_tx,
            ),
        }
    }

    tracing::debug!("Wallet session task stopped");
}

/// Apply one input and execute the resulting effects
fn step(
    machine: &mut SessionMachine,
    input: SessionInput,
    provider: &Arc<dyn WalletProvider>,
    store: &Arc<dyn KvStore>,
    result_tx: &mpsc::UnboundedSender<SessionInput>,
    info_tx: &watch::Sender<WalletInfo>,
) {
    for effect in machine.apply(input) {
        match effect {
            SessionEffect::BeginConnect { epoch } => {
                let provider = provider.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    let input = match connect_with(provider.as_ref()).await {
                        Ok((accounts, chain_id)) => SessionInput::ConnectSucceeded {
                            epoch,
                            accounts,
                            chain_id,
                        },
                        Err(error) => {
                            tracing::warn!("Wallet connect failed: {}", error);
                            SessionInput::ConnectFailed { epoch, error }
                        }
                    };
                    let _ = tx.send(input);
                });
            }
            SessionEffect::FetchBalance { epoch, address } => {
                let provider = provider.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    match provider.get_balance(&address).await {
                        Ok(balance) => {
                            let _ = tx.send(SessionInput::BalanceFetched {
                                epoch,
                                address,
                                balance,
                            });
                        }
                        // Balance stays None; the session itself is fine
                        Err(error) => tracing::warn!("Balance fetch failed: {}", error),
                    }
                });
            }
            SessionEffect::PersistConnected => store.set(WAS_CONNECTED_KEY, "true"),
            SessionEffect::ClearPersisted => store.remove(WAS_CONNECTED_KEY),
        }
    }
    let _ = info_tx.send(machine.info().clone());
}

async fn connect_with(
    provider: &dyn WalletProvider,
) -> Result<(Vec<Address>, ChainId), WalletError> {
    let accounts = provider.request_accounts().await?;
    let chain_id = provider.chain_id().await?;
    Ok((accounts, chain_id))
}
