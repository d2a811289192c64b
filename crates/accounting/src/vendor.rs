//! Vendor / payee record.

use serde::{Deserialize, Serialize};

use contracts_core::{Contract, VendorId};

/// Vendor or payee as known to the source system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_1099_eligible: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Vendor {
    pub fn new(id: VendorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: None,
            is_1099_eligible: false,
            is_active: true,
        }
    }
}

impl Contract for Vendor {}
