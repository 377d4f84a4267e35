//! Service Model

use serde::{Deserialize, Serialize};

/// Service catalog entry
///
/// Also used as the selection line item in the booking cart: the customer
/// picks a set of these and the totals are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price in the shop currency
    pub price: f64,
    /// Duration in minutes
    pub duration: i64,
}

/// Raw provider document for a service
#[derive(Debug, Clone, Deserialize)]
pub struct RawServiceDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration: i64,
}

impl From<RawServiceDocument> for Service {
    fn from(doc: RawServiceDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            price: doc.price,
            duration: doc.duration,
        }
    }
}
