use rust_decimal::Decimal;

use crate::core::{AppError, FieldError, FormNumber, Result};
use crate::modules::invoices::models::{InvoiceDraft, InvoiceLineInput};

const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_NOTES_LEN: usize = 2000;

/// Strict gate run before a draft is turned into a submission payload.
///
/// Unlike the calculator, which coerces whatever it is given, this pass
/// collects every problem with a wire-path field name so the form can show
/// them next to the offending cells.
pub struct DraftValidator;

impl DraftValidator {
    pub fn validate(draft: &InvoiceDraft) -> Result<()> {
        let errors = Self::collect_errors(draft);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidDraft(errors))
        }
    }

    pub fn collect_errors(draft: &InvoiceDraft) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if draft.customer_id <= 0 {
            errors.push(FieldError::new("customerId", "Customer is required"));
        }

        match (draft.issue_date, draft.due_date) {
            (None, _) => errors.push(FieldError::new("issueDate", "Issue date is required")),
            (Some(issued), Some(due)) if due < issued => errors.push(FieldError::new(
                "dueDate",
                "Due date cannot be before the issue date",
            )),
            _ => {}
        }

        if draft
            .notes
            .as_ref()
            .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN)
        {
            errors.push(FieldError::new(
                "notes",
                format!("Notes cannot exceed {} characters", MAX_NOTES_LEN),
            ));
        }

        if draft.invoice_lines.is_empty() {
            errors.push(FieldError::new(
                "invoiceLines",
                "Invoice must have at least one line",
            ));
        }

        for (index, line) in draft.invoice_lines.iter().enumerate() {
            Self::validate_line(index, line, &mut errors);
        }

        errors
    }

    fn validate_line(index: usize, line: &InvoiceLineInput, errors: &mut Vec<FieldError>) {
        let field = |name: &str| format!("invoiceLines[{}].{}", index, name);

        if line.product_id <= 0 {
            errors.push(FieldError::new(field("productId"), "Product is required"));
        }

        if line.tax_id <= 0 {
            errors.push(FieldError::new(field("taxId"), "Tax is required"));
        }

        match &line.quantity {
            FormNumber::Invalid(_) => {
                errors.push(FieldError::new(field("quantity"), "Quantity must be a number"))
            }
            quantity if quantity.value() <= Decimal::ZERO => errors.push(FieldError::new(
                field("quantity"),
                "Quantity must be greater than 0",
            )),
            _ => {}
        }

        match &line.unit_price {
            FormNumber::Invalid(_) => errors.push(FieldError::new(
                field("unitPrice"),
                "Unit price must be a number",
            )),
            price if price.value() < Decimal::ZERO => errors.push(FieldError::new(
                field("unitPrice"),
                "Unit price cannot be negative",
            )),
            _ => {}
        }

        match &line.discount_rate {
            FormNumber::Invalid(_) => errors.push(FieldError::new(
                field("discountRate"),
                "Discount must be a number",
            )),
            rate if rate.value() < Decimal::ZERO || rate.value() > Decimal::ONE_HUNDRED => {
                errors.push(FieldError::new(
                    field("discountRate"),
                    "Discount must be between 0 and 100",
                ))
            }
            _ => {}
        }

        if line
            .description
            .as_ref()
            .is_some_and(|text| text.chars().count() > MAX_DESCRIPTION_LEN)
        {
            errors.push(FieldError::new(
                field("description"),
                format!("Description cannot exceed {} characters", MAX_DESCRIPTION_LEN),
            ));
        }
    }
}
