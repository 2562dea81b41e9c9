//! Bond preview calculations
//!
//! Pure math: parameters in, coupon schedule and yield out. No I/O and no
//! clock access - the caller supplies "now", so identical inputs always
//! produce identical schedules.

use chrono::{DateTime, Duration, Utc};
use chronofi_core::BondError;

use crate::constants::day_count::DAYS_PER_YEAR;
use crate::state::{BondParameters, BondPreview, CouponPayment};

/// Compute the full preview for a set of bond terms.
///
/// # Errors
/// Returns [`BondError`] when principal, tenor, or rate are out of
/// domain. Validation runs first, so the arithmetic below can never
/// produce NaN or infinite outputs.
pub fn compute_preview(
    params: &BondParameters,
    now: DateTime<Utc>,
) -> Result<BondPreview, BondError> {
    validate(params)?;

    let maturity_date = now + Duration::days(params.tenor_days);
    let annual_coupon = params.principal * params.interest_rate / 100.0;

    let coupon_payments = match params.coupon_frequency.interval_days() {
        // Single payout at maturity pays the full nominal annual coupon.
        // Unlike the periodic branches this does not prorate by tenor;
        // kept to match the shipped schedule until product says otherwise.
        None => vec![CouponPayment {
            date: maturity_date,
            amount: annual_coupon,
            is_paid: false,
        }],
        Some(interval) => {
            let interval = i64::from(interval);
            let periods_per_year = DAYS_PER_YEAR / interval as f64;
            let num_payments = std::cmp::max(1, params.tenor_days / interval);
            let amount = annual_coupon / periods_per_year;

            (1..=num_payments)
                .map(|i| {
                    let date = now + Duration::days(i * interval);
                    CouponPayment {
                        // A schedule slot can land past maturity when the
                        // tenor is shorter than one interval; clamp it back
                        date: date.min(maturity_date),
                        amount,
                        is_paid: false,
                    }
                })
                .collect()
        }
    };

    let total_interest: f64 = coupon_payments.iter().map(|p| p.amount).sum();
    let total_return = params.principal + total_interest;
    let effective_yield_pct = (total_interest / params.principal)
        * (DAYS_PER_YEAR / params.tenor_days as f64)
        * 100.0;

    Ok(BondPreview {
        maturity_date,
        total_return,
        effective_yield_pct,
        coupon_payments,
        principal_return_date: maturity_date,
    })
}

fn validate(params: &BondParameters) -> Result<(), BondError> {
    if !params.principal.is_finite() || params.principal <= 0.0 {
        return Err(BondError::InvalidPrincipal {
            principal: params.principal,
        });
    }
    if params.tenor_days < 1 {
        return Err(BondError::InvalidTenor {
            days: params.tenor_days,
        });
    }
    if !params.interest_rate.is_finite() || params.interest_rate < 0.0 {
        return Err(BondError::InvalidRate {
            rate: params.interest_rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CouponFrequency;
    use chrono::TimeZone;

    const EPS: f64 = 1e-6;

    fn frozen_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn params(
        principal: f64,
        tenor_days: i64,
        rate: f64,
        frequency: CouponFrequency,
    ) -> BondParameters {
        BondParameters::new(principal, tenor_days, rate, frequency)
    }

    #[test]
    fn test_quarterly_90_day_bond() {
        // 1000 at 5% over 90 days, quarterly: one coupon of
        // 1000 * 0.05 / (365/90) = 12.3288
        let preview = compute_preview(
            &params(1000.0, 90, 5.0, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap();

        assert_eq!(preview.coupon_payments.len(), 1);
        let expected = 1000.0 * 0.05 / (365.0 / 90.0);
        assert!((preview.coupon_payments[0].amount - expected).abs() < EPS);
        assert!((preview.total_return - (1000.0 + expected)).abs() < EPS);
        assert!((preview.total_return - 1012.3288).abs() < 1e-3);
    }

    #[test]
    fn test_monthly_one_year_bond() {
        // 1000 at 5% over 365 days, monthly: 12 coupons of
        // 1000 * 0.05 / (365/30) = 4.1096, total interest ~49.3
        let preview = compute_preview(
            &params(1000.0, 365, 5.0, CouponFrequency::Monthly),
            frozen_now(),
        )
        .unwrap();

        assert_eq!(preview.coupon_payments.len(), 12);
        let expected = 1000.0 * 0.05 / (365.0 / 30.0);
        for payment in &preview.coupon_payments {
            assert!((payment.amount - expected).abs() < EPS);
            assert!(!payment.is_paid);
        }
        assert!((preview.total_interest() - 49.315068).abs() < 1e-3);
    }

    #[test]
    fn test_maturity_frequency_single_flat_coupon() {
        let preview = compute_preview(
            &params(1000.0, 90, 5.0, CouponFrequency::Maturity),
            frozen_now(),
        )
        .unwrap();

        assert_eq!(preview.coupon_payments.len(), 1);
        let payment = &preview.coupon_payments[0];
        assert_eq!(payment.date, preview.maturity_date);
        // Flat annual coupon, not prorated to the 90-day tenor
        assert!((payment.amount - 50.0).abs() < EPS);
        assert!((preview.total_return - 1050.0).abs() < EPS);
    }

    #[test]
    fn test_maturity_and_principal_return_dates() {
        let now = frozen_now();
        let preview =
            compute_preview(&params(500.0, 180, 4.0, CouponFrequency::Monthly), now).unwrap();

        assert_eq!(preview.maturity_date, now + Duration::days(180));
        assert_eq!(preview.principal_return_date, preview.maturity_date);
    }

    #[test]
    fn test_dates_ascend_and_never_pass_maturity() {
        let preview = compute_preview(
            &params(2500.0, 400, 7.5, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap();

        let dates: Vec<_> = preview.coupon_payments.iter().map(|p| p.date).collect();
        for pair in dates.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(*dates.last().unwrap() <= preview.maturity_date);
    }

    #[test]
    fn test_short_tenor_clamps_to_maturity() {
        // 29-day tenor with a 30-day interval: the guaranteed single
        // payment would land a day past maturity without the clamp
        let preview = compute_preview(
            &params(1000.0, 29, 5.0, CouponFrequency::Monthly),
            frozen_now(),
        )
        .unwrap();

        assert_eq!(preview.coupon_payments.len(), 1);
        assert_eq!(preview.coupon_payments[0].date, preview.maturity_date);
    }

    #[test]
    fn test_coupon_sum_matches_total_return_minus_principal() {
        for frequency in [
            CouponFrequency::Monthly,
            CouponFrequency::Quarterly,
            CouponFrequency::SemiAnnual,
            CouponFrequency::Annual,
        ] {
            let preview =
                compute_preview(&params(1234.56, 540, 6.25, frequency), frozen_now()).unwrap();
            let sum: f64 = preview.coupon_payments.iter().map(|p| p.amount).sum();
            assert!((sum - (preview.total_return - 1234.56)).abs() < EPS);
        }
    }

    #[test]
    fn test_yield_scales_inversely_with_tenor() {
        // Same coupon count, shorter tenor: annualization pushes the
        // effective yield up
        let short = compute_preview(
            &params(1000.0, 90, 5.0, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap();
        let long = compute_preview(
            &params(1000.0, 110, 5.0, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap();
        assert!(short.effective_yield_pct > long.effective_yield_pct);

        // The maturity branch holds the nominal coupon fixed, so the
        // inverse relation is exact
        let short = compute_preview(
            &params(1000.0, 90, 5.0, CouponFrequency::Maturity),
            frozen_now(),
        )
        .unwrap();
        let long = compute_preview(
            &params(1000.0, 180, 5.0, CouponFrequency::Maturity),
            frozen_now(),
        )
        .unwrap();
        assert!((short.effective_yield_pct / long.effective_yield_pct - 2.0).abs() < EPS);
    }

    #[test]
    fn test_exact_year_quarterly_yield_matches_nominal() {
        // 360 days of 90-day quarters: four full coupons, annualized
        // yield lands within rounding of the nominal 5%
        let preview = compute_preview(
            &params(1000.0, 360, 5.0, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap();
        assert_eq!(preview.coupon_payments.len(), 4);
        assert!((preview.effective_yield_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent_for_frozen_now() {
        let input = params(1000.0, 365, 5.0, CouponFrequency::Monthly);
        let a = compute_preview(&input, frozen_now()).unwrap();
        let b = compute_preview(&input, frozen_now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let preview = compute_preview(
            &params(1000.0, 365, 0.0, CouponFrequency::Monthly),
            frozen_now(),
        )
        .unwrap();
        assert!((preview.total_return - 1000.0).abs() < EPS);
        assert!((preview.effective_yield_pct).abs() < EPS);
    }

    #[test]
    fn test_invalid_principal_rejected() {
        for principal in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            let err = compute_preview(
                &params(principal, 90, 5.0, CouponFrequency::Quarterly),
                frozen_now(),
            )
            .unwrap_err();
            assert!(matches!(err, BondError::InvalidPrincipal { .. }));
        }
    }

    #[test]
    fn test_invalid_tenor_rejected() {
        for tenor in [0, -5] {
            let err = compute_preview(
                &params(1000.0, tenor, 5.0, CouponFrequency::Quarterly),
                frozen_now(),
            )
            .unwrap_err();
            assert!(matches!(err, BondError::InvalidTenor { .. }));
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = compute_preview(
            &params(1000.0, 90, -1.0, CouponFrequency::Quarterly),
            frozen_now(),
        )
        .unwrap_err();
        assert!(matches!(err, BondError::InvalidRate { .. }));
    }

    #[test]
    fn test_is_halal_does_not_change_schedule() {
        let base = params(1000.0, 365, 5.0, CouponFrequency::Monthly);
        let mut halal = base.clone();
        halal.is_halal = true;

        let a = compute_preview(&base, frozen_now()).unwrap();
        let b = compute_preview(&halal, frozen_now()).unwrap();
        assert_eq!(a, b);
    }
}
