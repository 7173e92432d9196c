//! Customer create form and list.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, PLUS};

use super::components::{
    colors, empty_list, or_dash, primary_button_with_icon, record_card, styled_button_with_icon, text_input,
};
use super::forms::{self, CustomerDraft, Draft};
use super::panel::{Panel, PanelContext, PanelEvent};
use crate::api::{Backend, Customers};
use crate::error::AppError;
use crate::export;
use crate::fetch::{Fetch, Submission};
use crate::models::Customer;

#[derive(Default)]
pub struct CustomersPanel {
    pub customers: Fetch<(), Vec<Customer>>,
    pub draft: CustomerDraft,
    submission: Submission,
}

impl CustomersPanel {
    /// Validate the draft and POST it. Returns `false` when nothing was sent.
    pub fn submit(&mut self, backend: &Backend) -> bool {
        forms::submit(&self.draft, &mut self.submission, backend)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_pending()
    }

    fn export(&self) -> Option<PanelEvent> {
        let path = export::show_save_dialog(&export::generate_export_filename("customers"))?;
        Some(match export::export_customers(self.customers.items(), &path) {
            Ok(()) => PanelEvent::Exported(path),
            Err(e) => PanelEvent::ExportFailed(e.to_string()),
        })
    }
}

impl Panel for CustomersPanel {
    fn refresh(&mut self, backend: &Backend) {
        let api = backend.api.clone();
        self.customers
            .ensure((), &backend.rt, move |_| async move { api.list::<Customers>(None).await });
    }

    fn poll(&mut self) -> Option<PanelEvent> {
        self.customers.poll();
        match self.submission.poll() {
            Some(true) => {
                self.draft.clear_submitted();
                Some(PanelEvent::Saved("customer"))
            }
            _ => None,
        }
    }

    fn is_busy(&self) -> bool {
        self.customers.is_loading() || self.submission.is_pending()
    }

    fn error(&self) -> Option<&AppError> {
        self.submission.error().or(self.customers.error())
    }

    fn take_pending_write(&mut self) -> Option<Submission> {
        self.submission.is_pending().then(|| std::mem::take(&mut self.submission))
    }

    fn render(&mut self, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            text_input(ui, "Customer Name", &mut self.draft.name, "Acme Corp");
            text_input(ui, "Email", &mut self.draft.email, "ops@acme.com");
            text_input(ui, "Industry", &mut self.draft.industry, "Fintech");
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, PLUS, "Add Customer", colors::BLUE, !self.is_submitting()).clicked() {
                self.submit(&ctx.backend);
            }

            ui.add_space(10.0);

            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                event = self.export();
            }
        });

        ui.add_space(15.0);

        let customers = self.customers.items();
        if customers.is_empty() {
            empty_list(ui, self.customers.is_loading(), "customers");
            return event;
        }

        ScrollArea::vertical().id_salt("customers_scroll").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                for customer in customers {
                    record_card(ui, &customer.name, "", or_dash(customer.email.as_deref()));
                }
            });
        });

        event
    }
}
