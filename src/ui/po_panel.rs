//! Purchase order create form and list, filtered by the selected customer.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, PLUS};

use super::components::{
    colors, empty_list, money, or_dash, primary_button_with_icon, record_card, record_select, styled_button_with_icon,
    text_input,
};
use super::forms::{self, Draft, PurchaseOrderDraft};
use super::panel::{Panel, PanelContext, PanelEvent};
use crate::api::{Backend, Customers, PurchaseOrders};
use crate::error::AppError;
use crate::export;
use crate::fetch::{Fetch, Submission};
use crate::models::{Customer, PurchaseOrder, RecordId};

#[derive(Default)]
pub struct PurchaseOrdersPanel {
    pub customers: Fetch<(), Vec<Customer>>,
    /// Keyed by the selected customer; `None` lists every PO.
    pub orders: Fetch<Option<RecordId>, Vec<PurchaseOrder>>,
    pub draft: PurchaseOrderDraft,
    submission: Submission,
}

impl PurchaseOrdersPanel {
    /// Change the customer selection. The PO list re-fetches on the next refresh.
    pub fn select_customer(&mut self, customer_id: Option<RecordId>) {
        self.draft.customer_id = customer_id;
    }

    /// Validate the draft and POST it. Returns `false` when nothing was sent.
    pub fn submit(&mut self, backend: &Backend) -> bool {
        forms::submit(&self.draft, &mut self.submission, backend)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_pending()
    }

    fn export(&self) -> Option<PanelEvent> {
        let path = export::show_save_dialog(&export::generate_export_filename("purchase_orders"))?;
        Some(match export::export_purchase_orders(self.orders.items(), &path) {
            Ok(()) => PanelEvent::Exported(path),
            Err(e) => PanelEvent::ExportFailed(e.to_string()),
        })
    }
}

impl Panel for PurchaseOrdersPanel {
    fn refresh(&mut self, backend: &Backend) {
        let api = backend.api.clone();
        self.customers
            .ensure((), &backend.rt, move |_| async move { api.list::<Customers>(None).await });

        let api = backend.api.clone();
        self.orders.ensure(self.draft.customer_id.clone(), &backend.rt, move |filter| {
            let filter = filter.clone();
            async move { api.list::<PurchaseOrders>(filter.as_ref()).await }
        });
    }

    fn poll(&mut self) -> Option<PanelEvent> {
        self.customers.poll();
        self.orders.poll();
        match self.submission.poll() {
            Some(true) => {
                self.draft.clear_submitted();
                Some(PanelEvent::Saved("purchase order"))
            }
            _ => None,
        }
    }

    fn is_busy(&self) -> bool {
        self.customers.is_loading() || self.orders.is_loading() || self.submission.is_pending()
    }

    fn error(&self) -> Option<&AppError> {
        self.submission
            .error()
            .or(self.orders.error())
            .or(self.customers.error())
    }

    fn take_pending_write(&mut self) -> Option<Submission> {
        self.submission.is_pending().then(|| std::mem::take(&mut self.submission))
    }

    fn render(&mut self, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            let options = self.customers.items().iter().map(|c| (&c.id, c.name.as_str()));
            let mut selected = self.draft.customer_id.clone();
            if record_select(ui, "po_customer", "Customer", "Select customer", &mut selected, options) {
                tracing::debug!("PO customer filter: {selected:?}");
            }
            self.select_customer(selected);

            text_input(ui, "PO Number", &mut self.draft.po_number, "");
            text_input(ui, "Amount", &mut self.draft.amount, "0");
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, PLUS, "Add PO", colors::EMERALD, !self.is_submitting()).clicked() {
                self.submit(&ctx.backend);
            }

            ui.add_space(10.0);

            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                event = self.export();
            }
        });

        ui.add_space(15.0);

        let orders = self.orders.items();
        if orders.is_empty() {
            empty_list(ui, self.orders.is_loading(), "purchase orders");
            return event;
        }

        ScrollArea::vertical().id_salt("pos_scroll").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                for po in orders {
                    let detail = format!(
                        "Amount: {} | Billed: {} | Balance: {}",
                        money(&ctx.currency, po.amount),
                        money(&ctx.currency, po.billed_amount),
                        money(&ctx.currency, po.po_balance),
                    );
                    record_card(ui, &po.po_number, or_dash(po.status.as_deref()), &detail);
                }
            });
        });

        event
    }
}
