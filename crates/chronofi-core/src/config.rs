//! Configuration types for Chronofi

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::constants::CHRONON_USD_PAIR;
use crate::{Address, ChainId};

/// Execution mode governing admin gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Admin access only for allow-listed addresses
    Production,
    /// Any connected wallet is treated as admin
    Preview,
}

/// Capabilities injected into the session machine at startup.
///
/// Constructed explicitly by the caller and passed down; nothing in the
/// core reads ambient environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub mode: Mode,
    /// Addresses granted elevated access; compared case-insensitively
    #[serde(default)]
    pub admin_allow_list: Vec<String>,
    /// Chain ids the product supports
    pub supported_chains: HashSet<ChainId>,
}

impl Environment {
    /// Production environment with an explicit admin allow-list
    pub fn production(
        admins: impl IntoIterator<Item = impl Into<String>>,
        chains: impl IntoIterator<Item = ChainId>,
    ) -> Self {
        Self {
            mode: Mode::Production,
            admin_allow_list: admins.into_iter().map(Into::into).collect(),
            supported_chains: chains.into_iter().collect(),
        }
    }

    /// Preview environment: no allow-list needed, every wallet is admin
    pub fn preview(chains: impl IntoIterator<Item = ChainId>) -> Self {
        Self {
            mode: Mode::Preview,
            admin_allow_list: Vec::new(),
            supported_chains: chains.into_iter().collect(),
        }
    }

    /// Admin rule: allow-list membership in production, any connected
    /// address in preview mode. Callers must only pass a connected address.
    pub fn is_admin(&self, address: &Address) -> bool {
        match self.mode {
            Mode::Preview => true,
            Mode::Production => self
                .admin_allow_list
                .iter()
                .any(|admin| address.matches(admin)),
        }
    }

    pub fn is_chain_supported(&self, chain_id: ChainId) -> bool {
        self.supported_chains.contains(&chain_id)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::production(Vec::<String>::new(), [1])
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Injected capability object for admin gating and chain support
    pub environment: Environment,

    /// Price pair used for USD conversions
    #[serde(default = "default_price_pair")]
    pub price_pair: String,
}

fn default_price_pair() -> String {
    CHRONON_USD_PAIR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            price_pair: default_price_pair(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.environment.mode, Mode::Production);
        assert_eq!(config.price_pair, "CHR/USD");
        assert!(config.environment.is_chain_supported(1));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.environment.mode, config.environment.mode);
        assert_eq!(parsed.price_pair, config.price_pair);
    }

    #[test]
    fn test_admin_allow_list_case_insensitive() {
        let env = Environment::production(["0xAb5801a7D398351b8bE11C439e05C5b3259aec9B"], [1]);
        let lower = Address::new("0xab5801a7d398351b8be11c439e05c5b3259aec9b");
        let other = Address::new("0x0000000000000000000000000000000000000001");
        assert!(env.is_admin(&lower));
        assert!(!env.is_admin(&other));
    }

    #[test]
    fn test_preview_mode_grants_admin_to_any_address() {
        let env = Environment::preview([1]);
        let anyone = Address::new("0x0000000000000000000000000000000000000002");
        assert!(env.is_admin(&anyone));
    }

    #[test]
    fn test_chain_support() {
        let env = Environment::production(Vec::<String>::new(), [1, 137]);
        assert!(env.is_chain_supported(137));
        assert!(!env.is_chain_supported(56));
    }
}
