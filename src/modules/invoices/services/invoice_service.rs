use std::sync::Arc;

use crate::core::{Currency, Result, SessionContext};
use crate::modules::erp::ErpBackend;
use crate::modules::invoices::models::{
    InvoiceDraft, InvoiceLineInput, InvoicePreview, InvoiceRecord, PreviewRequest,
};
use crate::modules::products::{Product, ProductCatalog};
use crate::modules::taxes::{TaxRate, TaxTable};

use super::draft_validator::DraftValidator;
use super::totals_calculator::InvoiceTotalsCalculator;

/// Service for invoice preview and submission
///
/// Preview and submission resolve their lookup tables through the same path
/// and apply product defaults the same way, so the amounts the user saw are
/// the amounts that get submitted.
pub struct InvoiceService {
    backend: Arc<dyn ErpBackend>,
    calculator: InvoiceTotalsCalculator,
    default_currency: Currency,
}

impl InvoiceService {
    pub fn new(backend: Arc<dyn ErpBackend>) -> Self {
        Self {
            backend,
            calculator: InvoiceTotalsCalculator::new(),
            default_currency: Currency::default(),
        }
    }

    /// Currency stamped on drafts that do not pick one
    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Compute the live preview for a set of form rows
    ///
    /// Tables sent with the request replace the matching backend read; the
    /// others are fetched.
    pub async fn preview(
        &self,
        request: PreviewRequest,
        session: &SessionContext,
    ) -> Result<InvoicePreview> {
        let (taxes, catalog) = self
            .resolve_tables(request.tax_rates, request.products, session)
            .await?;
        let lines = with_product_defaults(&catalog, &request.invoice_lines);

        Ok(self.calculator.preview(&lines, &taxes))
    }

    /// Validate a draft, build its payload and submit it to the backend
    pub async fn submit(
        &self,
        mut draft: InvoiceDraft,
        session: &SessionContext,
    ) -> Result<InvoiceRecord> {
        DraftValidator::validate(&draft)?;
        draft.currency.get_or_insert(self.default_currency);

        let (taxes, catalog) = self.resolve_tables(None, None, session).await?;
        draft.invoice_lines = with_product_defaults(&catalog, &draft.invoice_lines);

        let payload = self.calculator.build_create_payload(&draft, &taxes, session);

        tracing::info!(
            company_id = session.company_id,
            user_id = session.user_id,
            lines = payload.invoice_lines.len(),
            total = %payload.currency.format_amount(payload.total_amount_incl_tax),
            backend = self.backend.name(),
            "Submitting invoice"
        );

        let record = self.backend.create_invoice(session, &payload).await?;

        tracing::info!(
            company_id = session.company_id,
            invoice_id = record.id,
            "Invoice created"
        );

        Ok(record)
    }

    /// Tax table and product catalog, fetched concurrently unless supplied
    async fn resolve_tables(
        &self,
        tax_rates: Option<Vec<TaxRate>>,
        products: Option<Vec<Product>>,
        session: &SessionContext,
    ) -> Result<(TaxTable, ProductCatalog)> {
        let (tax_rates, products) = tokio::try_join!(
            async {
                match tax_rates {
                    Some(rates) => Ok(rates),
                    None => self.backend.fetch_tax_rates(session).await,
                }
            },
            async {
                match products {
                    Some(products) => Ok(products),
                    None => self.backend.fetch_products(session).await,
                }
            },
        )?;

        Ok((TaxTable::validated(tax_rates), products.into_iter().collect()))
    }
}

fn with_product_defaults(
    catalog: &ProductCatalog,
    lines: &[InvoiceLineInput],
) -> Vec<InvoiceLineInput> {
    lines.iter().map(|line| catalog.apply_defaults(line)).collect()
}
