//! Records returned by the backend and request bodies sent to it.

pub mod agreement;
pub mod customer;
pub mod invoice;
pub mod purchase_order;
pub mod summary;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use agreement::{Agreement, AgreementKind, NewAgreement};
pub use customer::{Customer, NewCustomer};
pub use invoice::{Invoice, NewInvoice};
pub use purchase_order::{NewPurchaseOrder, PurchaseOrder};
pub use summary::{DashboardSummary, Totals};

/// Backend record identifier.
///
/// The API may hand out numeric or string ids. They are kept as text and
/// always sent back as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId(s),
            RawId::Number(n) => RecordId(n.to_string()),
        })
    }
}

/// Read `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_number_or_string() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "65f1c0a2", 12.5]"#).unwrap();
        assert_eq!(ids[0].as_str(), "7");
        assert_eq!(ids[1].as_str(), "65f1c0a2");
        assert_eq!(ids[2].as_str(), "12.5");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let customer: Customer = serde_json::from_str(r#"{"id": null, "name": null, "email": null}"#).unwrap();
        assert_eq!(customer.id, RecordId::default());
        assert!(customer.name.is_empty());
        assert!(customer.email.is_none());
    }

    #[test]
    fn test_record_id_serializes_as_string() {
        let json = serde_json::to_string(&RecordId::new("7")).unwrap();
        assert_eq!(json, r#""7""#);
    }
}
