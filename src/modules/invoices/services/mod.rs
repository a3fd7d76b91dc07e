pub mod draft_validator;
pub mod invoice_service;
pub mod totals_calculator;

pub use draft_validator::DraftValidator;
pub use invoice_service::InvoiceService;
pub use totals_calculator::{InvoiceTotalsCalculator, SubmissionLines};
