use std::collections::HashMap;

use rust_decimal::Decimal;

use super::tax::TaxRate;
use crate::modules::taxes::services::TaxCalculator;

/// Tax rates keyed by id, built once per request and passed to the calculator
#[derive(Debug, Clone, Default)]
pub struct TaxTable {
    rates: HashMap<i64, TaxRate>,
}

impl TaxTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table dropping any rate that fails validation, whether the
    /// rates come from the backend or from the browser. Lines pointing at a
    /// dropped rate resolve to 0%.
    pub fn validated(rates: Vec<TaxRate>) -> Self {
        let calculator = TaxCalculator::new();

        rates
            .into_iter()
            .filter(|tax| match calculator.validate_tax_rate(tax.rate) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(tax_id = tax.id, code = %tax.code, "Ignoring tax rate: {}", err);
                    false
                }
            })
            .collect()
    }

    pub fn insert(&mut self, tax: TaxRate) {
        self.rates.insert(tax.id, tax);
    }

    pub fn get(&self, tax_id: i64) -> Option<&TaxRate> {
        self.rates.get(&tax_id)
    }

    /// Percentage for `tax_id`, or 0 when the id does not resolve
    pub fn rate_for(&self, tax_id: i64) -> Decimal {
        self.get(tax_id)
            .map(|tax| tax.rate)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, tax_id: i64) -> bool {
        self.rates.contains_key(&tax_id)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rates sorted by id, for stable listings
    pub fn to_sorted_vec(&self) -> Vec<TaxRate> {
        let mut rates: Vec<TaxRate> = self.rates.values().cloned().collect();
        rates.sort_by_key(|tax| tax.id);
        rates
    }
}

impl FromIterator<TaxRate> for TaxTable {
    fn from_iter<I: IntoIterator<Item = TaxRate>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|tax| (tax.id, tax)).collect(),
        }
    }
}
