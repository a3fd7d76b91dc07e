// Invoice line models
//
// `InvoiceLineInput` is one row of the invoice form exactly as the browser
// holds it; numeric cells stay fail-soft `FormNumber`s so a half-typed row
// still previews. `LineComputedAmounts` is what the calculator derives from
// a row, and `InvoiceLinePayload` is the self-describing line record sent to
// the ERP backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::form::lenient_id;
use crate::core::FormNumber;

/// One row of a draft invoice, supplied by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineInput {
    /// Catalog reference, 0 when no product is picked
    #[serde(default, deserialize_with = "lenient_id")]
    pub product_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub quantity: FormNumber,

    /// Pre-discount, pre-tax price per unit
    #[serde(default)]
    pub unit_price: FormNumber,

    /// Percentage in [0, 100]; blank means no discount
    #[serde(default)]
    pub discount_rate: FormNumber,

    /// Tax bracket reference, 0 when no tax is picked
    #[serde(default, deserialize_with = "lenient_id")]
    pub tax_id: i64,
}

impl InvoiceLineInput {
    pub fn new(
        product_id: i64,
        quantity: impl Into<FormNumber>,
        unit_price: impl Into<FormNumber>,
        tax_id: i64,
    ) -> Self {
        Self {
            product_id,
            description: None,
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            discount_rate: FormNumber::Blank,
            tax_id,
        }
    }

    pub fn with_discount(mut self, discount_rate: impl Into<FormNumber>) -> Self {
        self.discount_rate = discount_rate.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Amounts derived from one line; never persisted by this service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineComputedAmounts {
    /// Percentage resolved from the tax table (0 when unresolved)
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub tax_rate: Decimal,

    /// quantity × unit price
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub gross_amount: Decimal,

    /// gross × discount rate / 100
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub discount_amount: Decimal,

    /// gross − discount
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub net_amount_excl_tax: Decimal,

    /// net × tax rate / 100
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub vat_amount: Decimal,

    /// net + VAT
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount_incl_tax: Decimal,
}

impl LineComputedAmounts {
    pub const ZERO: Self = Self {
        tax_rate: Decimal::ZERO,
        gross_amount: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        net_amount_excl_tax: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        total_amount_incl_tax: Decimal::ZERO,
    };
}

/// Line record embedded in `POST /invoices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLinePayload {
    pub product_id: i64,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub discount_rate: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub gross_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub discount_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub net_amount_excl_tax: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub vat_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount_incl_tax: Decimal,
    pub tax_id: i64,
}

impl InvoiceLinePayload {
    /// The computed-amount view of this record
    pub fn amounts(&self, tax_rate: Decimal) -> LineComputedAmounts {
        LineComputedAmounts {
            tax_rate,
            gross_amount: self.gross_amount,
            discount_amount: self.discount_amount,
            net_amount_excl_tax: self.net_amount_excl_tax,
            vat_amount: self.vat_amount,
            total_amount_incl_tax: self.total_amount_incl_tax,
        }
    }
}
