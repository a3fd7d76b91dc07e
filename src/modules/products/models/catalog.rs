use std::collections::HashMap;

use super::product::Product;
use crate::modules::invoices::models::InvoiceLineInput;

/// Catalog items keyed by id
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<i64, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn get(&self, product_id: i64) -> Option<&Product> {
        self.products.get(&product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Fill what the form fills when a product is picked.
    ///
    /// Only blank fields are touched: a blank unit price takes the catalog
    /// price, an empty description takes the product text, an unset tax
    /// takes the product's default bracket. Unknown products leave the line
    /// as it is.
    pub fn apply_defaults(&self, line: &InvoiceLineInput) -> InvoiceLineInput {
        let mut line = line.clone();
        let Some(product) = self.get(line.product_id) else {
            return line;
        };

        if line.unit_price.is_blank() {
            line.unit_price = product.unit_price.into();
        }

        let has_description = line
            .description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        if !has_description {
            line.description = Some(product.line_description().to_string());
        }

        if line.tax_id == 0 {
            if let Some(tax_id) = product.tax_id {
                line.tax_id = tax_id;
            }
        }

        line
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().map(|product| (product.id, product)).collect(),
        }
    }
}
