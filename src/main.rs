use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::from_fn, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facturix::config::{AppConfig, Config, LogFormat, ServerConfig};
use facturix::erp::{ErpBackend, HttpErpBackend};
use facturix::invoices::InvoiceService;
use facturix::middleware::{request_id, REQUEST_ID_HEADER};

fn init_tracing(app: &AppConfig) {
    // RUST_LOG wins, then LOG_LEVEL
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(app.log_filter()))
        .unwrap_or_else(|_| "facturix=debug,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn cors(server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .expose_headers(vec![REQUEST_ID_HEADER])
        .max_age(3600);

    match &server.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin).supports_credentials(),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting Facturix invoice service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Default currency: {}", config.app.default_currency);
    tracing::info!("ERP backend: {}", config.backend.base_url);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let backend: Arc<dyn ErpBackend> = Arc::new(
        HttpErpBackend::new(&config.backend).context("Failed to build ERP backend client")?,
    );
    let invoice_service = Arc::new(
        InvoiceService::new(backend.clone()).with_default_currency(config.app.default_currency),
    );

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config))
            .wrap(from_fn(request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(backend.clone()))
            .app_data(web::Data::new(invoice_service.clone()))
            .configure(facturix::modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
