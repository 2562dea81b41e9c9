//! price-feed: Price lookups for Chronofi
//!
//! USD conversions go through an external price feed, treated as a black
//! box that returns a decimal price and an observation timestamp. The
//! [`CachedFeed`] decorator serves the last known point when the feed is
//! down, so display code keeps working through outages.

pub mod feeds;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chronofi_core::FeedError;
use serde::{Deserialize, Serialize};

pub use feeds::{CachedFeed, StaticFeed};

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// A single observed price for a pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Pair name, e.g. "CHR/USD"
    pub pair: String,
    /// Quote-currency units per one base unit
    pub price: f64,
    pub last_updated: DateTime<Utc>,
}

/// External price feed collaborator
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn get_price(&self, pair: &str) -> Result<PricePoint>;
}
