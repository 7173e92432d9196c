//! REST API access: typed client, per-entity resource descriptions, and the
//! runtime handle that requests are spawned on.

pub mod client;
pub mod resource;

pub use client::ApiClient;
pub use resource::{Agreements, Customers, Invoices, PurchaseOrders, Resource};

/// API client paired with the runtime its requests run on.
///
/// Cheap to clone; panels receive a reference each frame.
#[derive(Clone)]
pub struct Backend {
    pub api: ApiClient,
    pub rt: tokio::runtime::Handle,
}

impl Backend {
    pub fn new(api: ApiClient, rt: tokio::runtime::Handle) -> Self {
        Self { api, rt }
    }
}
