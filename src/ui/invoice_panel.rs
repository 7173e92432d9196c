//! Invoice create form and list, filtered by the selected PO.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, PLUS};

use super::components::{
    colors, empty_list, money, or_dash, primary_button_with_icon, record_card, record_select, styled_button_with_icon,
    text_input,
};
use super::forms::{self, Draft, InvoiceDraft};
use super::panel::{Panel, PanelContext, PanelEvent};
use crate::api::{Backend, Customers, Invoices, PurchaseOrders};
use crate::error::AppError;
use crate::export;
use crate::fetch::{Fetch, Submission};
use crate::models::{Customer, Invoice, PurchaseOrder, RecordId};

#[derive(Default)]
pub struct InvoicesPanel {
    pub customers: Fetch<(), Vec<Customer>>,
    /// Every PO, unfiltered, for the PO select.
    pub orders: Fetch<(), Vec<PurchaseOrder>>,
    /// Keyed by the selected PO; `None` lists every invoice.
    pub invoices: Fetch<Option<RecordId>, Vec<Invoice>>,
    pub draft: InvoiceDraft,
    submission: Submission,
}

impl InvoicesPanel {
    pub fn select_customer(&mut self, customer_id: Option<RecordId>) {
        self.draft.customer_id = customer_id;
    }

    /// Change the PO selection. The invoice list re-fetches on the next refresh.
    pub fn select_po(&mut self, po_id: Option<RecordId>) {
        self.draft.po_id = po_id;
    }

    /// Validate the draft and POST it. Returns `false` when nothing was sent.
    pub fn submit(&mut self, backend: &Backend) -> bool {
        forms::submit(&self.draft, &mut self.submission, backend)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_pending()
    }

    fn export(&self) -> Option<PanelEvent> {
        let path = export::show_save_dialog(&export::generate_export_filename("invoices"))?;
        Some(match export::export_invoices(self.invoices.items(), &path) {
            Ok(()) => PanelEvent::Exported(path),
            Err(e) => PanelEvent::ExportFailed(e.to_string()),
        })
    }
}

impl Panel for InvoicesPanel {
    fn refresh(&mut self, backend: &Backend) {
        let api = backend.api.clone();
        self.customers
            .ensure((), &backend.rt, move |_| async move { api.list::<Customers>(None).await });

        let api = backend.api.clone();
        self.orders
            .ensure((), &backend.rt, move |_| async move { api.list::<PurchaseOrders>(None).await });

        let api = backend.api.clone();
        self.invoices.ensure(self.draft.po_id.clone(), &backend.rt, move |filter| {
            let filter = filter.clone();
            async move { api.list::<Invoices>(filter.as_ref()).await }
        });
    }

    fn poll(&mut self) -> Option<PanelEvent> {
        self.customers.poll();
        self.orders.poll();
        self.invoices.poll();
        match self.submission.poll() {
            Some(true) => {
                self.draft.clear_submitted();
                Some(PanelEvent::Saved("invoice"))
            }
            _ => None,
        }
    }

    fn is_busy(&self) -> bool {
        self.customers.is_loading()
            || self.orders.is_loading()
            || self.invoices.is_loading()
            || self.submission.is_pending()
    }

    fn error(&self) -> Option<&AppError> {
        self.submission
            .error()
            .or(self.invoices.error())
            .or(self.orders.error())
            .or(self.customers.error())
    }

    fn take_pending_write(&mut self) -> Option<Submission> {
        self.submission.is_pending().then(|| std::mem::take(&mut self.submission))
    }

    fn render(&mut self, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            let customers = self.customers.items().iter().map(|c| (&c.id, c.name.as_str()));
            let mut customer_id = self.draft.customer_id.clone();
            record_select(ui, "invoice_customer", "Customer", "Select customer", &mut customer_id, customers);

            let orders = self.orders.items().iter().map(|po| (&po.id, po.po_number.as_str()));
            let mut po_id = self.draft.po_id.clone();
            if record_select(ui, "invoice_po", "PO", "Select PO", &mut po_id, orders) {
                tracing::debug!("Invoice PO filter: {po_id:?}");
            }

            self.select_customer(customer_id);
            self.select_po(po_id);

            text_input(ui, "Invoice Number", &mut self.draft.invoice_number, "");
            text_input(ui, "Amount", &mut self.draft.amount, "0");
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, PLUS, "Add Invoice", colors::VIOLET, !self.is_submitting()).clicked() {
                self.submit(&ctx.backend);
            }

            ui.add_space(10.0);

            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                event = self.export();
            }
        });

        ui.add_space(15.0);

        let invoices = self.invoices.items();
        if invoices.is_empty() {
            empty_list(ui, self.invoices.is_loading(), "invoices");
            return event;
        }

        ScrollArea::vertical().id_salt("invoices_scroll").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                for inv in invoices {
                    let detail = format!(
                        "Amount: {} | Received: {} | Balance: {}",
                        money(&ctx.currency, inv.amount),
                        money(&ctx.currency, inv.amount_received),
                        money(&ctx.currency, inv.balance_amount),
                    );
                    record_card(ui, &inv.invoice_number, or_dash(inv.payment_status.as_deref()), &detail);
                }
            });
        });

        event
    }
}
