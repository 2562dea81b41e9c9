//! USD conversion helpers
//!
//! Previews stay denominated in chronons; these helpers convert amounts
//! and totals at an observed price from the feed.

use chronofi_core::FeedError;
use price_feed::{PriceFeed, PricePoint};
use serde::{Deserialize, Serialize};

use crate::state::BondPreview;

/// Convert a chronon amount to USD at an observed price
pub fn to_usd(amount: f64, point: &PricePoint) -> f64 {
    amount * point.price
}

/// Preview totals converted at an observed price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsdTotals {
    pub pair: String,
    /// USD per chronon at conversion time
    pub price: f64,
    pub total_return_usd: f64,
    pub total_interest_usd: f64,
    pub as_of: chrono::DateTime<chrono::Utc>,
}

impl UsdTotals {
    pub fn from_preview(preview: &BondPreview, point: &PricePoint) -> Self {
        Self {
            pair: point.pair.clone(),
            price: point.price,
            total_return_usd: to_usd(preview.total_return, point),
            total_interest_usd: to_usd(preview.total_interest(), point),
            as_of: point.last_updated,
        }
    }
}

/// Convert preview totals using a live (or cached) feed quote
pub async fn preview_in_usd(
    feed: &dyn PriceFeed,
    pair: &str,
    preview: &BondPreview,
) -> Result<UsdTotals, FeedError> {
    let point = feed.get_price(pair).await?;
    Ok(UsdTotals::from_preview(preview, &point))
}
