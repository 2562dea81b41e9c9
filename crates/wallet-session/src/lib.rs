//! wallet-session: Wallet connection lifecycle for Chronofi
//!
//! Two layers:
//!
//! - [`machine`]: the pure state machine. Inputs (caller requests,
//!   provider results, provider events) go in; state changes and effects
//!   come out. No I/O, so ordering and cancellation are unit-testable.
//! - [`session`]: the async driver. Owns a machine on a tokio task,
//!   executes effects against the provider and key-value store, and
//!   publishes [`machine::WalletInfo`] snapshots through a watch channel.
//!
//! # Example
//!
//! ```ignore
//! let session = WalletSession::spawn(env, provider, store);
//! session.connect();
//! // ... later
//! let info = session.info();
//! assert_eq!(info.connection_state, ConnectionState::Connected);
//! ```

pub mod machine;
pub mod session;

pub use machine::{ConnectionState, SessionEffect, SessionInput, SessionMachine, WalletInfo};
pub use session::{SessionHandle, WalletSession, WAS_CONNECTED_KEY};
