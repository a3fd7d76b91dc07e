use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named tax bracket as served by `GET /taxes`
///
/// `rate` is a percentage: `16` means 16%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: i64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deductible: Option<bool>,
}

impl TaxRate {
    pub fn new(id: i64, code: impl Into<String>, rate: Decimal) -> Self {
        let code = code.into();
        Self {
            id,
            label: code.clone(),
            code,
            rate,
            is_deductible: None,
        }
    }
}
