//! Discount rate handling shared by every collection option
//!
//! The creditor's annual opportunity cost is converted once into an effective
//! monthly rate. All options are discounted on that same monthly grid so
//! their present values are comparable.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Months per year used for the annual to monthly conversion
pub const MONTHS_PER_YEAR: u32 = 12;

/// Effective monthly discount rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountRate {
    /// Monthly rate as a fraction (0.05 = 5% per month)
    pub monthly_rate: f64,
}

impl DiscountRate {
    /// Derive the monthly rate from an annual percentage (120.0 = 120% p.a.)
    pub fn from_annual_pct(annual_pct: f64) -> EngineResult<Self> {
        Ok(Self {
            monthly_rate: monthly_discount_rate(annual_pct)?,
        })
    }

    /// Wrap an already monthly rate
    pub fn from_monthly_rate(monthly_rate: f64) -> EngineResult<Self> {
        validate_monthly_rate(monthly_rate)?;
        Ok(Self { monthly_rate })
    }

    /// Present value of an amount paid at the end of `period`
    pub fn present_value(&self, amount: f64, period: u32) -> f64 {
        amount / self.accumulation(period)
    }

    fn accumulation(&self, period: u32) -> f64 {
        let base = 1.0 + self.monthly_rate;
        match i32::try_from(period) {
            Ok(exponent) => base.powi(exponent),
            Err(_) => base.powf(period as f64),
        }
    }
}

/// `(1 + annual_pct/100)^(1/12) - 1`
pub fn monthly_discount_rate(annual_pct: f64) -> EngineResult<f64> {
    if !annual_pct.is_finite() {
        return Err(EngineError::invalid_input(
            "annual_discount_rate_pct",
            format!("must be finite, got {}", annual_pct),
        ));
    }
    if annual_pct <= -100.0 {
        return Err(EngineError::invalid_input(
            "annual_discount_rate_pct",
            format!("must be greater than -100%, got {}", annual_pct),
        ));
    }

    Ok((1.0 + annual_pct / 100.0).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0)
}

/// A monthly rate at or below -100% would make discount factors meaningless
pub(crate) fn validate_monthly_rate(monthly_rate: f64) -> EngineResult<()> {
    if !monthly_rate.is_finite() || monthly_rate <= -1.0 {
        return Err(EngineError::invalid_input(
            "monthly_discount_rate",
            format!("must be finite and greater than -1, got {}", monthly_rate),
        ));
    }
    Ok(())
}

/// PV of `n_months` level payments of `amount`, first payment one month out
#[cfg(test)]
pub(crate) fn pv_level_annuity(amount: f64, n_months: u32, monthly_rate: f64) -> f64 {
    if monthly_rate.abs() < 1e-12 {
        return amount * n_months as f64;
    }

    let v = 1.0 / (1.0 + monthly_rate);
    amount * (1.0 - v.powi(n_months as i32)) / monthly_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_monthly_rate_from_120_pct() {
        let rate = monthly_discount_rate(120.0).unwrap();
        assert_relative_eq!(rate, 2.2_f64.powf(1.0 / 12.0) - 1.0, max_relative = 1e-12);
        assert_abs_diff_eq!(rate, 0.0679, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_annual_rate() {
        let rate = DiscountRate::from_annual_pct(0.0).unwrap();
        assert_eq!(rate.monthly_rate, 0.0);
        assert_eq!(rate.present_value(250.0, 12), 250.0);
    }

    #[test]
    fn test_twelve_months_compound_to_annual() {
        let rate = DiscountRate::from_annual_pct(36.0).unwrap();
        assert_relative_eq!(rate.present_value(1.36, 12), 1.0, max_relative = 1e-10);
    }

    #[test]
    fn test_present_value_beyond_i32_periods() {
        let rate = DiscountRate::from_monthly_rate(0.0).unwrap();
        assert_eq!(rate.present_value(42.0, u32::MAX), 42.0);

        let rate = DiscountRate::from_monthly_rate(0.01).unwrap();
        assert_eq!(rate.present_value(42.0, i32::MAX as u32 + 1), 0.0);
    }

    #[test]
    fn test_present_value_matches_factor() {
        let rate = DiscountRate::from_monthly_rate(0.05).unwrap();
        let pv = rate.present_value(1_000.0, 3);
        assert_relative_eq!(pv, 1_000.0 / 1.05_f64.powi(3), max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_rates() {
        assert!(monthly_discount_rate(-100.0).is_err());
        assert!(monthly_discount_rate(f64::NAN).is_err());
        assert!(DiscountRate::from_monthly_rate(-1.0).is_err());
        assert!(DiscountRate::from_monthly_rate(f64::INFINITY).is_err());
        // Negative but above -100% is a valid (if unusual) assumption
        assert!(monthly_discount_rate(-20.0).is_ok());
    }

    #[test]
    fn test_pv_level_annuity() {
        // $100/month for 12 months at 0.5% monthly
        let pv = pv_level_annuity(100.0, 12, 0.005);
        assert_abs_diff_eq!(pv, 1161.89, epsilon = 0.01);
        assert_eq!(pv_level_annuity(100.0, 12, 0.0), 1200.0);
    }
}
