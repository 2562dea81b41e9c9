//! Bond state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::intervals;

/// How often a bond pays coupons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CouponFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    /// Single payout together with the principal
    Maturity,
}

impl CouponFrequency {
    /// Days between coupon payments; None for a single payout at maturity
    pub fn interval_days(&self) -> Option<u32> {
        match self {
            Self::Monthly => Some(intervals::MONTHLY),
            Self::Quarterly => Some(intervals::QUARTERLY),
            Self::SemiAnnual => Some(intervals::SEMI_ANNUAL),
            Self::Annual => Some(intervals::ANNUAL),
            Self::Maturity => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
            Self::Maturity => "at maturity",
        }
    }
}

impl fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Immutable input terms for a bond preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondParameters {
    /// Invested amount in chronons
    pub principal: f64,

    /// Bond lifetime in days
    pub tenor_days: i64,

    /// Nominal annual interest rate as a percentage (5.0 means 5%)
    pub interest_rate: f64,

    pub coupon_frequency: CouponFrequency,

    /// Marks halal-structured instruments. Display-only; the schedule
    /// math is identical either way.
    #[serde(default)]
    pub is_halal: bool,

    #[serde(default)]
    pub name: Option<String>,
}

impl BondParameters {
    pub fn new(
        principal: f64,
        tenor_days: i64,
        interest_rate: f64,
        coupon_frequency: CouponFrequency,
    ) -> Self {
        Self {
            principal,
            tenor_days,
            interest_rate,
            coupon_frequency,
            is_halal: false,
            name: None,
        }
    }
}

/// A single scheduled coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponPayment {
    pub date: DateTime<Utc>,
    /// Coupon amount in chronons
    pub amount: f64,
    pub is_paid: bool,
}

/// Preview derived entirely from [`BondParameters`]; recomputed on every
/// parameter change, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPreview {
    pub maturity_date: DateTime<Utc>,
    /// Principal plus all coupon interest, in chronons
    pub total_return: f64,
    /// Effective annualized yield as a percentage
    pub effective_yield_pct: f64,
    /// Ascending by date; the final date never exceeds maturity
    pub coupon_payments: Vec<CouponPayment>,
    pub principal_return_date: DateTime<Utc>,
}

impl BondPreview {
    /// Sum of all coupon amounts
    pub fn total_interest(&self) -> f64 {
        self.coupon_payments.iter().map(|p| p.amount).sum()
    }
}
