//! Endpoint descriptions for the four list/create resources.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{
    Agreement, Customer, Invoice, NewAgreement, NewCustomer, NewInvoice, NewPurchaseOrder, PurchaseOrder,
};

/// A collection the backend can list and append to.
pub trait Resource: 'static {
    /// Collection path, relative to the base URL.
    const PATH: &'static str;
    /// Query parameter used to narrow `GET` results, if the collection supports one.
    const FILTER_PARAM: Option<&'static str>;
    /// Human-readable name used in logs and messages.
    const LABEL: &'static str;

    type Record: DeserializeOwned + Send + 'static;
    type New: Serialize + Send + Sync + 'static;
}

pub struct Customers;
pub struct PurchaseOrders;
pub struct Invoices;
pub struct Agreements;

impl Resource for Customers {
    const PATH: &'static str = "/api/customers";
    const FILTER_PARAM: Option<&'static str> = None;
    const LABEL: &'static str = "customer";
    type Record = Customer;
    type New = NewCustomer;
}

impl Resource for PurchaseOrders {
    const PATH: &'static str = "/api/pos";
    const FILTER_PARAM: Option<&'static str> = Some("customer_id");
    const LABEL: &'static str = "purchase order";
    type Record = PurchaseOrder;
    type New = NewPurchaseOrder;
}

impl Resource for Invoices {
    const PATH: &'static str = "/api/invoices";
    const FILTER_PARAM: Option<&'static str> = Some("po_id");
    const LABEL: &'static str = "invoice";
    type Record = Invoice;
    type New = NewInvoice;
}

impl Resource for Agreements {
    const PATH: &'static str = "/api/agreements";
    const FILTER_PARAM: Option<&'static str> = None;
    const LABEL: &'static str = "agreement";
    type Record = Agreement;
    type New = NewAgreement;
}
