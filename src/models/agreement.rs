//! Agreement / NDA record and create body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Kind of contractual document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementKind {
    #[default]
    Agreement,
    #[serde(rename = "NDA")]
    Nda,
}

impl AgreementKind {
    pub const ALL: [AgreementKind; 2] = [AgreementKind::Agreement, AgreementKind::Nda];

    pub fn label(&self) -> &'static str {
        match self {
            AgreementKind::Agreement => "Agreement",
            AgreementKind::Nda => "NDA",
        }
    }
}

/// Agreement as listed by `GET /api/agreements`.
///
/// `kind` is kept as text so unexpected values still render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agreement {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: RecordId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub customer_id: Option<RecordId>,
    pub end_date: Option<String>,
    pub renewal_status: Option<String>,
}

/// Body for `POST /api/agreements`.
///
/// `end_date` is sent as `null` when not set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgreement {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgreementKind,
    pub customer_id: RecordId,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agreement_body() {
        let body = NewAgreement {
            name: "Master Services".to_string(),
            kind: AgreementKind::Nda,
            customer_id: RecordId::new("3"),
            end_date: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Master Services",
                "type": "NDA",
                "customer_id": "3",
                "end_date": null,
            })
        );
    }

    #[test]
    fn test_end_date_format() {
        let body = NewAgreement {
            name: "Renewal".to_string(),
            kind: AgreementKind::Agreement,
            customer_id: RecordId::new("3"),
            end_date: NaiveDate::from_ymd_opt(2027, 3, 31),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["end_date"], "2027-03-31");
        assert_eq!(json["type"], "Agreement");
    }

    #[test]
    fn test_agreement_record_tolerates_missing_fields() {
        let record: Agreement = serde_json::from_str(r#"{"id": 9, "name": "NDA 2026", "type": "NDA"}"#).unwrap();
        assert_eq!(record.id.as_str(), "9");
        assert_eq!(record.kind.as_deref(), Some("NDA"));
        assert!(record.end_date.is_none());
        assert!(record.renewal_status.is_none());
    }
}
