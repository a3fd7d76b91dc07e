use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::backend::ErpBackend;
use crate::config::BackendConfig;
use crate::core::{AppError, Result, SessionContext};
use crate::modules::invoices::models::{CreateInvoicePayload, InvoiceRecord};
use crate::modules::products::Product;
use crate::modules::taxes::TaxRate;

/// List endpoints answer either a bare array or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) | ListResponse::Wrapped { data: items } => items,
        }
    }
}

/// ERP backend client over HTTP
pub struct HttpErpBackend {
    /// Reads, retried on transient failures
    reads: ClientWithMiddleware,
    /// Writes; never retried so an invoice cannot be created twice
    writes: Client,
    base_url: String,
}

impl HttpErpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let reads = ClientBuilder::new(client.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            reads,
            writes: client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionContext,
    ) -> Result<Vec<T>> {
        let mut request = self
            .reads
            .get(self.url(path))
            .query(&[("companyId", session.company_id)]);
        if let Some(token) = &session.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let list: ListResponse<T> = Self::decode(response).await?;
        Ok(list.into_vec())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::backend(status.as_u16(), body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            AppError::backend(status.as_u16(), format!("Malformed response: {}", err))
        })
    }
}

#[async_trait]
impl ErpBackend for HttpErpBackend {
    async fn fetch_tax_rates(&self, session: &SessionContext) -> Result<Vec<TaxRate>> {
        let taxes: Vec<TaxRate> = self.get_list("taxes", session).await?;
        tracing::debug!(company_id = session.company_id, count = taxes.len(), "Fetched tax rates");
        Ok(taxes)
    }

    async fn fetch_products(&self, session: &SessionContext) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.get_list("products", session).await?;
        tracing::debug!(
            company_id = session.company_id,
            count = products.len(),
            "Fetched products"
        );
        Ok(products)
    }

    async fn create_invoice(
        &self,
        session: &SessionContext,
        payload: &CreateInvoicePayload,
    ) -> Result<InvoiceRecord> {
        let mut request = self.writes.post(self.url("invoices")).json(payload);
        if let Some(token) = &session.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let record: InvoiceRecord = Self::decode(response).await.map_err(|err| {
            tracing::warn!(company_id = session.company_id, "Backend rejected invoice: {}", err);
            err
        })?;

        Ok(record)
    }

    fn name(&self) -> &str {
        "erp-http"
    }
}
