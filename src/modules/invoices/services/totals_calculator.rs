//! Invoice line pricing and tax aggregation.
//!
//! Everything here is pure and synchronous: the same functions back the live
//! preview (recomputed on every form change) and the payload sent to the
//! backend on submit, so both always agree. Numeric input is fail-soft: blank
//! or non-numeric cells count as 0 and unresolved tax references as 0%, so no
//! input shape makes these functions fail or panic. Rejecting incomplete
//! drafts is the job of [`super::DraftValidator`].

use chrono::Utc;
use rust_decimal::Decimal;

use crate::core::money::{add_or_zero, mul_or_zero, percent_of, sub_or_zero};
use crate::core::SessionContext;
use crate::modules::invoices::models::{
    CreateInvoicePayload, InvoiceDraft, InvoiceLineInput, InvoiceLinePayload, InvoicePreview,
    InvoiceTotals, LineComputedAmounts,
};
use crate::modules::taxes::{TaxCalculator, TaxTable};

/// Lines ready for `POST /invoices` together with their aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionLines {
    pub lines: Vec<InvoiceLinePayload>,
    pub totals: InvoiceTotals,
}

#[derive(Default)]
pub struct InvoiceTotalsCalculator {
    tax_calculator: TaxCalculator,
}

impl InvoiceTotalsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amounts for a single line
    ///
    /// gross = quantity × unit price, discount = gross × rate / 100,
    /// net = gross − discount, VAT = net × tax rate / 100, total = net + VAT.
    /// Line amounts are not rounded; only invoice totals are.
    pub fn compute_line(&self, line: &InvoiceLineInput, taxes: &TaxTable) -> LineComputedAmounts {
        let quantity = line.quantity.value();
        let unit_price = line.unit_price.value();
        let discount_rate = line.discount_rate.value();
        let tax_rate = taxes.rate_for(line.tax_id);

        let gross_amount = mul_or_zero(quantity, unit_price);
        let discount_amount = percent_of(gross_amount, discount_rate);
        let net_amount_excl_tax = sub_or_zero(gross_amount, discount_amount);
        let vat_amount = self.tax_calculator.calculate_vat(net_amount_excl_tax, tax_rate);
        let total_amount_incl_tax = add_or_zero(net_amount_excl_tax, vat_amount);

        LineComputedAmounts {
            tax_rate,
            gross_amount,
            discount_amount,
            net_amount_excl_tax,
            vat_amount,
            total_amount_incl_tax,
        }
    }

    /// Invoice aggregate; `{0, 0, 0}` for no lines
    pub fn compute_totals(&self, lines: &[InvoiceLineInput], taxes: &TaxTable) -> InvoiceTotals {
        let amounts: Vec<LineComputedAmounts> = lines
            .iter()
            .map(|line| self.compute_line(line, taxes))
            .collect();

        InvoiceTotals::from_lines(&amounts)
    }

    /// Per-line amounts and aggregate in one pass, for the on-screen preview
    pub fn preview(&self, lines: &[InvoiceLineInput], taxes: &TaxTable) -> InvoicePreview {
        let amounts: Vec<LineComputedAmounts> = lines
            .iter()
            .map(|line| self.compute_line(line, taxes))
            .collect();
        let totals = InvoiceTotals::from_lines(&amounts);

        InvoicePreview {
            lines: amounts,
            totals,
        }
    }

    /// Self-describing line records for the backend, recomputed from the
    /// current inputs (never taken from an earlier preview)
    pub fn to_submission_payload(
        &self,
        lines: &[InvoiceLineInput],
        taxes: &TaxTable,
    ) -> SubmissionLines {
        let mut amounts = Vec::with_capacity(lines.len());
        let mut payload = Vec::with_capacity(lines.len());

        for line in lines {
            let computed = self.compute_line(line, taxes);
            payload.push(InvoiceLinePayload {
                product_id: line.product_id,
                description: line.description.clone().unwrap_or_default(),
                quantity: line.quantity.value(),
                unit_price: line.unit_price.value(),
                discount_rate: line.discount_rate.value_or(Decimal::ZERO),
                gross_amount: computed.gross_amount,
                discount_amount: computed.discount_amount,
                net_amount_excl_tax: computed.net_amount_excl_tax,
                vat_amount: computed.vat_amount,
                total_amount_incl_tax: computed.total_amount_incl_tax,
                tax_id: line.tax_id,
            });
            amounts.push(computed);
        }

        SubmissionLines {
            lines: payload,
            totals: InvoiceTotals::from_lines(&amounts),
        }
    }

    /// Full `POST /invoices` body for a draft, stamped with the caller's
    /// company and user
    pub fn build_create_payload(
        &self,
        draft: &InvoiceDraft,
        taxes: &TaxTable,
        session: &SessionContext,
    ) -> CreateInvoicePayload {
        let SubmissionLines { lines, totals } =
            self.to_submission_payload(&draft.invoice_lines, taxes);

        CreateInvoicePayload {
            company_id: session.company_id,
            created_by_id: session.user_id,
            customer_id: draft.customer_id,
            issue_date: draft
                .issue_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            due_date: draft.due_date,
            currency: draft.currency.unwrap_or_default(),
            notes: draft
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
            invoice_lines: lines,
            total_amount_excl_tax: totals.subtotal_excl_tax,
            total_vat: totals.total_vat,
            total_amount_incl_tax: totals.total_incl_tax,
        }
    }
}
