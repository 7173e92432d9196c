//! GUI panels and application state.

pub mod agreement_panel;
pub mod app;
pub mod components;
pub mod customers_panel;
pub mod dashboard;
pub mod forms;
pub mod invoice_panel;
pub mod panel;
pub mod po_panel;

pub use app::App;
