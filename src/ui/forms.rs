//! Draft form state for the create forms.
//!
//! Drafts only check that required fields are present. Everything else is the
//! backend's business.

use chrono::NaiveDate;

use crate::api::{Agreements, Backend, Customers, Invoices, PurchaseOrders, Resource};
use crate::fetch::Submission;
use crate::models::{AgreementKind, NewAgreement, NewCustomer, NewInvoice, NewPurchaseOrder, RecordId};

/// Form values for creating one record of `Target`.
pub trait Draft {
    type Target: Resource;

    /// Build the request body, or `None` when a required field is missing.
    fn to_request(&self) -> Option<<Self::Target as Resource>::New>;

    /// Clear the fields consumed by a successful submission.
    fn clear_submitted(&mut self);
}

/// Validate `draft` and spawn its POST.
///
/// Returns `false` without touching the network when a required field is
/// missing or a previous write is still pending.
pub fn submit<D: Draft>(draft: &D, submission: &mut Submission, backend: &Backend) -> bool {
    let Some(body) = draft.to_request() else {
        tracing::debug!("Skipping {} submit: required field missing", <D::Target as Resource>::LABEL);
        return false;
    };

    let api = backend.api.clone();
    submission.start(&backend.rt, async move { api.create::<D::Target>(&body).await })
}

/// Trimmed value of a required text field.
fn required(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an amount field. Empty reads as zero; non-numeric input is rejected.
pub fn parse_amount(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(0.0);
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Customer form.
#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub industry: String,
}

impl Draft for CustomerDraft {
    type Target = Customers;

    fn to_request(&self) -> Option<NewCustomer> {
        Some(NewCustomer {
            name: required(&self.name)?,
            email: self.email.trim().to_string(),
            industry: self.industry.trim().to_string(),
        })
    }

    fn clear_submitted(&mut self) {
        self.name.clear();
        self.email.clear();
        self.industry.clear();
    }
}

/// Purchase order form. The selected customer also filters the PO list.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderDraft {
    pub customer_id: Option<RecordId>,
    pub po_number: String,
    pub amount: String,
}

impl Draft for PurchaseOrderDraft {
    type Target = PurchaseOrders;

    fn to_request(&self) -> Option<NewPurchaseOrder> {
        Some(NewPurchaseOrder {
            po_number: required(&self.po_number)?,
            customer_id: self.customer_id.clone()?,
            amount: parse_amount(&self.amount)?,
            status: NewPurchaseOrder::INITIAL_STATUS.to_string(),
        })
    }

    fn clear_submitted(&mut self) {
        self.po_number.clear();
        self.amount.clear();
    }
}

/// Invoice form. The selected PO also filters the invoice list.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDraft {
    pub customer_id: Option<RecordId>,
    pub po_id: Option<RecordId>,
    pub invoice_number: String,
    pub amount: String,
}

impl Draft for InvoiceDraft {
    type Target = Invoices;

    fn to_request(&self) -> Option<NewInvoice> {
        Some(NewInvoice {
            invoice_number: required(&self.invoice_number)?,
            po_id: self.po_id.clone()?,
            customer_id: self.customer_id.clone()?,
            amount: parse_amount(&self.amount)?,
        })
    }

    fn clear_submitted(&mut self) {
        self.invoice_number.clear();
        self.amount.clear();
    }
}

/// Agreement / NDA form.
#[derive(Debug, Clone, Default)]
pub struct AgreementDraft {
    pub customer_id: Option<RecordId>,
    pub name: String,
    pub kind: AgreementKind,
    pub end_date: Option<NaiveDate>,
}

impl Draft for AgreementDraft {
    type Target = Agreements;

    fn to_request(&self) -> Option<NewAgreement> {
        Some(NewAgreement {
            name: required(&self.name)?,
            kind: self.kind,
            customer_id: self.customer_id.clone()?,
            end_date: self.end_date,
        })
    }

    fn clear_submitted(&mut self) {
        self.name.clear();
        self.end_date = None;
    }
}
