// Invoice-level models
//
// `InvoiceDraft` is the invoice form posted by the browser. The calculator
// turns its lines into `InvoiceTotals` (live preview) and into a
// `CreateInvoicePayload` (submission). `InvoiceRecord` is what the ERP
// backend answers after persisting; it is the record of truth and may
// differ from our preview by fractions of a cent.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{InvoiceLineInput, InvoiceLinePayload, LineComputedAmounts};
use crate::core::form::lenient_id;
use crate::core::money::{add_or_zero, round2};
use crate::core::Currency;
use crate::modules::products::Product;
use crate::modules::taxes::TaxRate;

/// Invoice-level aggregate
///
/// `total_incl_tax` is always `subtotal_excl_tax + total_vat`: the two parts
/// are rounded to the cent first and then added, never the raw sum rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub subtotal_excl_tax: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_vat: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_incl_tax: Decimal,
}

impl InvoiceTotals {
    /// Build totals from the unrounded sums of net amounts and VAT
    pub fn from_sums(net_sum: Decimal, vat_sum: Decimal) -> Self {
        let subtotal_excl_tax = round2(net_sum);
        let total_vat = round2(vat_sum);

        Self {
            subtotal_excl_tax,
            total_vat,
            total_incl_tax: add_or_zero(subtotal_excl_tax, total_vat),
        }
    }

    /// Fold already computed line amounts
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a LineComputedAmounts>,
    {
        let (net_sum, vat_sum) = lines
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(net, vat), line| {
                (
                    add_or_zero(net, line.net_amount_excl_tax),
                    add_or_zero(vat, line.vat_amount),
                )
            });

        Self::from_sums(net_sum, vat_sum)
    }
}

/// Live preview: per-line amounts in input order plus the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePreview {
    pub lines: Vec<LineComputedAmounts>,
    pub totals: InvoiceTotals,
}

/// Body of `POST /api/invoices/preview`
///
/// Lookup tables are optional: when the browser already holds them it sends
/// them along, otherwise they are fetched from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub invoice_lines: Vec<InvoiceLineInput>,
    #[serde(default)]
    pub tax_rates: Option<Vec<TaxRate>>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

/// The invoice form as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Third party (customer) being invoiced, 0 when none is picked
    #[serde(default, deserialize_with = "lenient_id")]
    pub customer_id: i64,

    #[serde(default)]
    pub issue_date: Option<NaiveDate>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Falls back to the service's default currency when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub invoice_lines: Vec<InvoiceLineInput>,
}

/// Body of the backend's `POST /invoices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub company_id: i64,
    pub created_by_id: i64,
    pub customer_id: i64,
    pub issue_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub invoice_lines: Vec<InvoiceLinePayload>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount_excl_tax: Decimal,
    #[serde(rename = "totalVAT", serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_vat: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount_incl_tax: Decimal,
}

/// Invoice as persisted and returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Everything else the backend sends is passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
