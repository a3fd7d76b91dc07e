pub mod controllers;
pub mod models;
pub mod services;

pub use models::{TaxRate, TaxTable};
pub use services::TaxCalculator;
