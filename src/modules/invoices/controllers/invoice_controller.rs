use std::sync::Arc;

use actix_web::{web, HttpResponse};
use tracing::Instrument;

use crate::core::error::AppError;
use crate::core::SessionContext;
use crate::middleware::RequestIdValue;
use crate::modules::invoices::models::{InvoiceDraft, PreviewRequest};
use crate::modules::invoices::services::InvoiceService;

/// Live totals for the invoice form
/// POST /invoices/preview
///
/// Malformed numeric cells count as 0; this endpoint only fails when the
/// backend cannot serve the tax table.
pub async fn preview_invoice(
    service: web::Data<Arc<InvoiceService>>,
    session: SessionContext,
    request: web::Json<PreviewRequest>,
) -> Result<HttpResponse, AppError> {
    let preview = service.preview(request.into_inner(), &session).await?;

    Ok(HttpResponse::Ok().json(preview))
}

/// Submit a draft invoice to the backend
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    session: SessionContext,
    request_id: RequestIdValue,
    draft: web::Json<InvoiceDraft>,
) -> Result<HttpResponse, AppError> {
    let span = tracing::info_span!("submit_invoice", request_id = %request_id.0);
    let record = service
        .submit(draft.into_inner(), &session)
        .instrument(span)
        .await?;

    Ok(HttpResponse::Created().json(record))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("/preview", web::post().to(preview_invoice)),
    );
}
