//! Agreement / NDA create form and list.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{FILE_XLS, PLUS};

use super::components::{
    colors, empty_list, or_dash, primary_button_with_icon, record_card, record_select, select,
    styled_button_with_icon, text_input,
};
use super::forms::{self, AgreementDraft, Draft};
use super::panel::{Panel, PanelContext, PanelEvent};
use crate::api::{Agreements, Backend, Customers};
use crate::error::AppError;
use crate::export;
use crate::fetch::{Fetch, Submission};
use crate::models::{Agreement, AgreementKind, Customer};

#[derive(Default)]
pub struct AgreementsPanel {
    pub customers: Fetch<(), Vec<Customer>>,
    pub agreements: Fetch<(), Vec<Agreement>>,
    pub draft: AgreementDraft,
    submission: Submission,
}

impl AgreementsPanel {
    /// Validate the draft and POST it. Returns `false` when nothing was sent.
    pub fn submit(&mut self, backend: &Backend) -> bool {
        forms::submit(&self.draft, &mut self.submission, backend)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_pending()
    }

    fn export(&self) -> Option<PanelEvent> {
        let path = export::show_save_dialog(&export::generate_export_filename("agreements"))?;
        Some(match export::export_agreements(self.agreements.items(), &path) {
            Ok(()) => PanelEvent::Exported(path),
            Err(e) => PanelEvent::ExportFailed(e.to_string()),
        })
    }

    fn show_end_date(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label(RichText::new("End Date").small());
            ui.horizontal(|ui| {
                let mut has_end_date = self.draft.end_date.is_some();
                if ui.checkbox(&mut has_end_date, "").changed() {
                    self.draft.end_date = has_end_date.then(|| Local::now().date_naive());
                }
                match self.draft.end_date.as_mut() {
                    Some(date) => {
                        ui.add(DatePickerButton::new(date).id_salt("agreement_end_date"));
                    }
                    None => {
                        ui.label(RichText::new("None").weak());
                    }
                }
            });
        });
    }
}

impl Panel for AgreementsPanel {
    fn refresh(&mut self, backend: &Backend) {
        let api = backend.api.clone();
        self.customers
            .ensure((), &backend.rt, move |_| async move { api.list::<Customers>(None).await });

        let api = backend.api.clone();
        self.agreements
            .ensure((), &backend.rt, move |_| async move { api.list::<Agreements>(None).await });
    }

    fn poll(&mut self) -> Option<PanelEvent> {
        self.customers.poll();
        self.agreements.poll();
        match self.submission.poll() {
            Some(true) => {
                self.draft.clear_submitted();
                Some(PanelEvent::Saved("agreement"))
            }
            _ => None,
        }
    }

    fn is_busy(&self) -> bool {
        self.customers.is_loading() || self.agreements.is_loading() || self.submission.is_pending()
    }

    fn error(&self) -> Option<&AppError> {
        self.submission
            .error()
            .or(self.agreements.error())
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
            record_select(ui, "agreement_customer", "Customer", "Select customer", &mut customer_id, customers);
            self.draft.customer_id = customer_id;

            text_input(ui, "Agreement Name", &mut self.draft.name, "");
            select(
                ui,
                "agreement_kind",
                "Type",
                &mut self.draft.kind,
                &AgreementKind::ALL,
                AgreementKind::label,
            );
            self.show_end_date(ui);
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, PLUS, "Add Agreement", colors::ROSE, !self.is_submitting()).clicked() {
                self.submit(&ctx.backend);
            }

            ui.add_space(10.0);

            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                event = self.export();
            }
        });

        ui.add_space(15.0);

        let agreements = self.agreements.items();
        if agreements.is_empty() {
            empty_list(ui, self.agreements.is_loading(), "agreements");
            return event;
        }

        ScrollArea::vertical().id_salt("agreements_scroll").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                for agreement in agreements {
                    let mut detail = format!("Status: {}", or_dash(agreement.renewal_status.as_deref()));
                    if let Some(end) = agreement.end_date.as_deref().filter(|d| !d.is_empty()) {
                        detail.push_str(&format!(" • Ends {end}"));
                    }
                    record_card(ui, &agreement.name, or_dash(agreement.kind.as_deref()), &detail);
                }
            });
        });

        event
    }
}
