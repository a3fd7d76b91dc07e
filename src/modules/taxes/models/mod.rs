mod tax;
mod tax_table;

pub use tax::TaxRate;
pub use tax_table::TaxTable;
