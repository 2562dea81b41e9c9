//! Core type definitions for Chronofi

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wallet address (20 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used for case-insensitive comparisons
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Check that this is a 0x-prefixed 20-byte hex string
    pub fn is_well_formed(&self) -> bool {
        match self.0.strip_prefix("0x") {
            Some(body) => body.len() == 40 && hex::decode(body).is_ok(),
            None => false,
        }
    }

    /// Case-insensitive address equality
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain id reported by the wallet provider
pub type ChainId = u64;

/// Constants
pub mod constants {
    /// Display symbol for the native token unit
    pub const CHRONON_SYMBOL: &str = "\u{03c7}";

    /// Price feed pair used for USD conversions
    pub const CHRONON_USD_PAIR: &str = "CHR/USD";
}
