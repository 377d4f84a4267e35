//! Barber Model

use serde::{Deserialize, Serialize};

/// Barber (staff member)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub contact_info: Option<String>,
}

/// Raw provider document for a barber
#[derive(Debug, Clone, Deserialize)]
pub struct RawBarberDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    /// Shop reference, present on staff listings
    #[serde(default)]
    pub shop_id: Option<String>,
}

impl From<RawBarberDocument> for Barber {
    fn from(doc: RawBarberDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            contact_info: doc.contact_info,
        }
    }
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberCreate {
    pub name: String,
    pub contact_info: String,
}

/// Staff member as seen on the owner dashboard (cross-shop listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub contact_info: Option<String>,
    pub shop_id: Option<String>,
}

impl From<RawBarberDocument> for StaffMember {
    fn from(doc: RawBarberDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            contact_info: doc.contact_info,
            shop_id: doc.shop_id,
        }
    }
}
