// Invoices module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{
    CreateInvoicePayload, InvoiceDraft, InvoiceLineInput, InvoicePreview, InvoiceTotals,
    LineComputedAmounts,
};
pub use services::{DraftValidator, InvoiceService, InvoiceTotalsCalculator};
