//! Facturix invoice service library
//!
//! Browser-facing layer of a multi-tenant OHADA/SYSCOHADA invoicing product:
//! live invoice totals, draft validation and submission to the ERP backend.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::erp;
pub use modules::invoices;
pub use modules::products;
pub use modules::taxes;
