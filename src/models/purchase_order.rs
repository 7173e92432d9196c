//! Purchase order record and create body.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Purchase order as listed by `GET /api/pos`.
///
/// `billed_amount`, `po_balance` and `status` are derived by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseOrder {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: RecordId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub po_number: String,
    pub customer_id: Option<RecordId>,
    pub amount: Option<f64>,
    pub billed_amount: Option<f64>,
    pub po_balance: Option<f64>,
    pub status: Option<String>,
}

/// Body for `POST /api/pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub po_number: String,
    pub customer_id: RecordId,
    pub amount: f64,
    pub status: String,
}

impl NewPurchaseOrder {
    /// Status every new PO is created with.
    pub const INITIAL_STATUS: &'static str = "Active";
}
