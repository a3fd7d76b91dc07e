mod invoice;
mod line_item;

pub use invoice::{
    CreateInvoicePayload, InvoiceDraft, InvoicePreview, InvoiceRecord, InvoiceTotals,
    PreviewRequest,
};
pub use line_item::{InvoiceLineInput, InvoiceLinePayload, LineComputedAmounts};
