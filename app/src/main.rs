//! Chronofi dev harness
//!
//! Wires the mock wallet provider, in-memory store, and static price feed
//! into a session, runs a connect / preview / disconnect pass, and logs
//! the results. Every collaborator is constructed here and injected; the
//! core crates read no ambient state.

use std::sync::Arc;

use bond::{compute_preview, preview_in_usd, BondParameters, CouponFrequency};
use chrono::Utc;
use chronofi_core::types::constants::CHRONON_SYMBOL;
use chronofi_core::{Address, AppConfig, Environment, MemoryStore};
use price_feed::{CachedFeed, StaticFeed};
use wallet_provider::MockProvider;
use wallet_session::{ConnectionState, WalletSession};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chronofi=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Chronofi harness");

    let demo_address = Address::new("0xab5801a7d398351b8be11c439e05c5b3259aec9b");
    let config = AppConfig {
        environment: Environment::production([demo_address.normalized()], [1]),
        ..AppConfig::default()
    };
    let provider = Arc::new(MockProvider::new(1).with_account(demo_address, "2500.00"));
    let store = Arc::new(MemoryStore::new());
    let feed = CachedFeed::new(StaticFeed::new().with_price(&config.price_pair, 0.42));

    let session = WalletSession::spawn(config.environment.clone(), provider, store);
    session.connect();

    let mut updates = session.watch();
    loop {
        let state = session.info().connection_state;
        if state != ConnectionState::Connecting && state != ConnectionState::Disconnected {
            break;
        }
        if updates.changed().await.is_err() {
            tracing::error!("Session task ended unexpectedly");
            return;
        }
    }

    let info = session.info();
    tracing::info!(
        "Wallet: state={:?} address={:?} chain={:?} balance={:?} admin={}",
        info.connection_state,
        info.address,
        info.chain_id,
        info.balance,
        info.is_admin,
    );

    let params = BondParameters {
        principal: 1000.0,
        tenor_days: 365,
        interest_rate: 5.0,
        coupon_frequency: CouponFrequency::Monthly,
        is_halal: false,
        name: Some("Demo bond".to_string()),
    };

    match compute_preview(&params, Utc::now()) {
        Ok(preview) => {
            tracing::info!(
                "Preview: {} coupons, total return {:.2} {}, effective yield {:.2}%",
                preview.coupon_payments.len(),
                preview.total_return,
                CHRONON_SYMBOL,
                preview.effective_yield_pct,
            );
            match preview_in_usd(&feed, &config.price_pair, &preview).await {
                Ok(totals) => tracing::info!(
                    "USD totals at {} = {:.2}: return ${:.2}, interest ${:.2}",
                    totals.pair,
                    totals.price,
                    totals.total_return_usd,
                    totals.total_interest_usd,
                ),
                Err(e) => tracing::warn!("USD conversion unavailable: {}", e),
            }
        }
        Err(e) => tracing::error!("Preview failed: {}", e),
    }

    session.disconnect();
    session.shutdown();
}
