//! Tax rate endpoints
//!
//! Tax brackets are administered in the ERP backend; this service only
//! relays them, with invalid rates filtered out.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::SessionContext;
use crate::modules::erp::ErpBackend;
use crate::modules::taxes::TaxTable;

/// List tax rates for the caller's company
///
/// GET /taxes
pub async fn list_taxes(
    backend: web::Data<Arc<dyn ErpBackend>>,
    session: SessionContext,
) -> Result<HttpResponse, AppError> {
    let taxes = TaxTable::validated(backend.fetch_tax_rates(&session).await?);

    Ok(HttpResponse::Ok().json(taxes.to_sorted_vec()))
}

/// Get one tax rate
///
/// GET /taxes/{id}
pub async fn get_tax_by_id(
    backend: web::Data<Arc<dyn ErpBackend>>,
    session: SessionContext,
    tax_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let tax_id = tax_id.into_inner();
    let taxes = TaxTable::validated(backend.fetch_tax_rates(&session).await?);

    let tax = taxes
        .get(tax_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Tax rate {}", tax_id)))?;

    Ok(HttpResponse::Ok().json(tax))
}

/// Configure tax routes
pub fn configure_tax_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes")
            .route("", web::get().to(list_taxes))
            .route("/{id}", web::get().to(get_tax_by_id)),
    );
}
