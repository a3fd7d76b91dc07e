use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog item as served by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default selling price, pre-discount and pre-tax
    #[serde(alias = "price", serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    /// Default tax bracket suggested when the product is picked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<i64>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            unit_price,
            tax_id: None,
        }
    }

    pub fn with_tax(mut self, tax_id: i64) -> Self {
        self.tax_id = Some(tax_id);
        self
    }

    /// Text copied onto an invoice line: the description, else the name
    pub fn line_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.name)
    }
}
