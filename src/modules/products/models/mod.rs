mod catalog;
mod product;

pub use catalog::ProductCatalog;
pub use product::Product;
