//! Invoice record and create body.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Invoice as listed by `GET /api/invoices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: RecordId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub invoice_number: String,
    pub po_id: Option<RecordId>,
    pub customer_id: Option<RecordId>,
    pub amount: Option<f64>,
    pub amount_received: Option<f64>,
    pub balance_amount: Option<f64>,
    pub payment_status: Option<String>,
}

/// Body for `POST /api/invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub po_id: RecordId,
    pub customer_id: RecordId,
    pub amount: f64,
}
