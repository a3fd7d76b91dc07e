use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::percent_of;

/// TaxCalculator handles per-line VAT amounts and tax-rate sanity checks
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// VAT for one line: `net × rate / 100`
    ///
    /// Never fails: negative rates are treated as 0 and unrepresentable
    /// products clamp to 0, so a live preview cannot break on a bad rate.
    pub fn calculate_vat(&self, net_amount: Decimal, rate_percent: Decimal) -> Decimal {
        if rate_percent <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        percent_of(net_amount, rate_percent)
    }

    /// Validate a rate served by the backend
    ///
    /// Rates are percentages in [0, 100] with at most 4 decimal places.
    pub fn validate_tax_rate(&self, rate_percent: Decimal) -> Result<(), AppError> {
        if rate_percent < Decimal::ZERO {
            return Err(AppError::Validation(
                "Tax rate cannot be negative".to_string(),
            ));
        }

        if rate_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::Validation(
                "Tax rate cannot exceed 100%".to_string(),
            ));
        }

        // Trailing zeros do not count: 16.000000 is a valid rate
        if rate_percent.normalize().scale() > 4 {
            return Err(AppError::Validation(
                "Tax rate cannot have more than 4 decimal places".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
