//! Error types for Chronofi

use thiserror::Error;

/// Core errors that can occur in Chronofi
#[derive(Debug, Error)]
pub enum Error {
    #[error("Bond error: {0}")]
    Bond(#[from] BondError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Price feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Bond parameter validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BondError {
    #[error("Principal must be positive, got {principal}")]
    InvalidPrincipal { principal: f64 },

    #[error("Tenor must be at least 1 day, got {days}")]
    InvalidTenor { days: i64 },

    #[error("Interest rate cannot be negative, got {rate}")]
    InvalidRate { rate: f64 },
}

/// Wallet provider and connection errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("No wallet provider found. Install a wallet extension and reload the page.")]
    ProviderUnavailable,

    #[error("Connection request was declined in the wallet")]
    UserRejected,

    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// Price feed errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Price feed unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("No cached price for {pair}")]
    NoCachedPrice { pair: String },
}

/// Result type alias for Chronofi operations
pub type Result<T> = std::result::Result<T, Error>;

impl BondError {
    /// All parameter failures share one UI-facing error code
    pub fn error_code(&self) -> &'static str {
        "invalid_parameters"
    }
}

impl WalletError {
    /// Get a UI-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable => "provider_unavailable",
            Self::UserRejected => "user_rejected",
            Self::Provider(_) => "provider_error",
        }
    }

    /// Classify a raw provider failure into the error taxonomy.
    ///
    /// Injected providers surface rejection in several shapes (EIP-1193
    /// code 4001, "User rejected...", "denied"); anything unrecognized
    /// stays generic so the message is preserved for display.
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.contains("4001") || lower.contains("reject") || lower.contains("denied") {
            Self::UserRejected
        } else if lower.contains("no provider") || lower.contains("not installed") {
            Self::ProviderUnavailable
        } else {
            Self::Provider(raw.to_string())
        }
    }
}
