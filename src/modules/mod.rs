use actix_web::web;

use crate::core::AppError;

pub mod erp;
pub mod health;
pub mod invoices;
pub mod products;
pub mod taxes;

/// JSON body limit for draft invoices
const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Register every route of the service
///
/// `/health` sits at the root; everything the browser calls lives under
/// `/api`. Handlers expect `web::Data<Arc<InvoiceService>>` and
/// `web::Data<Arc<dyn ErpBackend>>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(health::controllers::configure_health_routes)
        .service(
            web::scope("/api")
                .configure(invoices::controllers::configure)
                .configure(taxes::controllers::configure_tax_routes),
        );
}

/// Malformed JSON bodies answer with the same error shape as every other
/// failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| AppError::validation(err.to_string()).into())
}
