//! Bond Preview Engine
//!
//! Fixed-income style instruments on the Chronon token: given bond terms,
//! compute the coupon schedule, maturity date, total return, and effective
//! annualized yield.
//!
//! # Units
//!
//! - Principal and coupon amounts: chronons (f64)
//! - Interest rate: nominal annual percentage (5.0 means 5%)
//! - Tenor: days
//!
//! # Example
//!
//! ```ignore
//! use bond::{compute_preview, BondParameters, CouponFrequency};
//!
//! let params = BondParameters::new(1000.0, 365, 5.0, CouponFrequency::Monthly);
//! let preview = compute_preview(&params, Utc::now())?;
//! println!("Total return: {:.2}", preview.total_return);
//! ```

pub mod calculator;
pub mod comparison;
pub mod constants;
pub mod state;
pub mod usd;

pub use calculator::compute_preview;
pub use comparison::{list_comparisons, remove_comparison, save_comparison, SavedComparison};
pub use state::*;
pub use usd::{preview_in_usd, to_usd, UsdTotals};
