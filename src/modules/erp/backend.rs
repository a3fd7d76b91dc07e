use async_trait::async_trait;

use crate::core::{Result, SessionContext};
use crate::modules::invoices::models::{CreateInvoicePayload, InvoiceRecord};
use crate::modules::products::Product;
use crate::modules::taxes::TaxRate;

/// The ERP backend REST API, as consumed by this service
#[async_trait]
pub trait ErpBackend: Send + Sync {
    /// `GET /taxes` for the caller's company
    async fn fetch_tax_rates(&self, session: &SessionContext) -> Result<Vec<TaxRate>>;

    /// `GET /products` for the caller's company
    async fn fetch_products(&self, session: &SessionContext) -> Result<Vec<Product>>;

    /// `POST /invoices`; the answer is the persisted record of truth
    async fn create_invoice(
        &self,
        session: &SessionContext,
        payload: &CreateInvoicePayload,
    ) -> Result<InvoiceRecord>;

    /// Backend name, for logs
    fn name(&self) -> &str;
}
