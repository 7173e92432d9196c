//! Customer record and create body.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Customer as listed by `GET /api/customers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: RecordId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    pub email: Option<String>,
    pub industry: Option<String>,
}

/// Body for `POST /api/customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub industry: String,
}
