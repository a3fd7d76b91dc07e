// Products module

pub mod models;

pub use models::{Product, ProductCatalog};
