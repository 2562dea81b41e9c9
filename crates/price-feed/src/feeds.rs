//! Feed implementations
//!
//! [`StaticFeed`] serves fixed prices for tests and the dev harness.
//! [`CachedFeed`] wraps any feed and falls back to the last successful
//! observation when the inner feed errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use chronofi_core::FeedError;

use crate::{PriceFeed, PricePoint, Result};

/// Fixed-price feed; prices can be updated and the feed taken offline
/// to exercise fallback paths
#[derive(Debug, Default)]
pub struct StaticFeed {
    prices: Mutex<HashMap<String, f64>>,
    offline: Mutex<bool>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a pair with a price
    pub fn with_price(self, pair: impl Into<String>, price: f64) -> Self {
        self.set_price(pair, price);
        self
    }

    pub fn set_price(&self, pair: impl Into<String>, price: f64) {
        self.prices
            .lock()
            .expect("price lock poisoned")
            .insert(pair.into(), price);
    }

    /// Simulate a feed outage
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().expect("offline lock poisoned") = offline;
    }
}

#[async_trait]
impl PriceFeed for StaticFeed {
    async fn get_price(&self, pair: &str) -> Result<PricePoint> {
        if *self.offline.lock().expect("offline lock poisoned") {
            return Err(FeedError::Unavailable {
                reason: "feed offline".to_string(),
            });
        }
        let prices = self.prices.lock().expect("price lock poisoned");
        match prices.get(pair) {
            Some(price) => Ok(PricePoint {
                pair: pair.to_string(),
                price: *price,
                last_updated: Utc::now(),
            }),
            None => Err(FeedError::Unavailable {
                reason: format!("no quote for {}", pair),
            }),
        }
    }
}

/// Serves the last known price when the inner feed fails
pub struct CachedFeed<F> {
    inner: F,
    cache: Mutex<HashMap<String, PricePoint>>,
}

impl<F: PriceFeed> CachedFeed<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<F: PriceFeed> PriceFeed for CachedFeed<F> {
    async fn get_price(&self, pair: &str) -> Result<PricePoint> {
        match self.inner.get_price(pair).await {
            Ok(point) => {
                let mut cache = self.cache.lock().expect("cache lock poisoned");
                cache.insert(pair.to_string(), point.clone());
                Ok(point)
            }
            Err(error) => {
                let cache = self.cache.lock().expect("cache lock poisoned");
                match cache.get(pair) {
                    Some(stale) => {
                        tracing::warn!(
                            "Price feed unavailable for {}, serving cached point from {}: {}",
                            pair,
                            stale.last_updated,
                            error
                        );
                        Ok(stale.clone())
                    }
                    None => Err(FeedError::NoCachedPrice {
                        pair: pair.to_string(),
                    }),
                }
            }
        }
    }
}
