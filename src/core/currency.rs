use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::round_to;

/// Currencies invoiced by DRC companies, with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Congolese Franc (2 decimal places, centimes)
    #[default]
    CDF,
    /// US Dollar (2 decimal places)
    USD,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::CDF | Currency::USD => 2,
        }
    }

    /// Rounds a decimal value to this currency's scale, half away from zero
    pub fn round(&self, amount: Decimal) -> Decimal {
        round_to(amount, self.scale())
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let width = self.scale() as usize;
        format!("{} {:.width$}", self, self.round(amount), width = width)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::CDF => write!(f, "CDF"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CDF" | "FC" => Ok(Currency::CDF),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
