//! Dashboard summary returned by `GET /api/dashboard-summary`.

use serde::{Deserialize, Serialize};

/// Summary envelope. A missing `totals` object reads as all zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    #[serde(deserialize_with = "super::null_as_default")]
    pub totals: Totals,
}

/// Aggregate counters computed by the backend.
///
/// Absent and `null` fields both read as zero through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    pub purchase_orders: Option<f64>,
    pub invoices: Option<f64>,
    pub paid_invoices: Option<f64>,
    pub outstanding_amount: Option<f64>,
}

impl Totals {
    pub fn purchase_orders(&self) -> f64 {
        self.purchase_orders.unwrap_or_default()
    }

    pub fn invoices(&self) -> f64 {
        self.invoices.unwrap_or_default()
    }

    pub fn paid_invoices(&self) -> f64 {
        self.paid_invoices.unwrap_or_default()
    }

    pub fn outstanding_amount(&self) -> f64 {
        self.outstanding_amount.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"totals": {"invoices": 4, "paid_invoices": null}}"#).unwrap();
        assert_eq!(summary.totals.invoices(), 4.0);
        assert_eq!(summary.totals.purchase_orders(), 0.0);
        assert_eq!(summary.totals.paid_invoices(), 0.0);
        assert_eq!(summary.totals.outstanding_amount(), 0.0);

        let empty: DashboardSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DashboardSummary::default());
    }
}
