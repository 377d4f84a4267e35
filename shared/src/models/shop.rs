//! Shop Model

use serde::{Deserialize, Serialize};

/// Shop location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    /// Tax as a decimal fraction (e.g. 0.18), not a percentage
    pub tax_rate: f64,
}

/// Raw provider document for a shop
#[derive(Debug, Clone, Deserialize)]
pub struct RawShopDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub tax_rate: f64,
}

impl From<RawShopDocument> for Shop {
    fn from(doc: RawShopDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            address: doc.address,
            phone_number: doc.phone_number,
            tax_rate: doc.tax_rate,
        }
    }
}
