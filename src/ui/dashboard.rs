//! Overview tab: four counters from the summary endpoint.

use eframe::egui::{Color32, Ui};

use super::components::{colors, stat_card};
use super::panel::{Panel, PanelContext, PanelEvent};
use crate::api::Backend;
use crate::error::AppError;
use crate::fetch::Fetch;
use crate::models::DashboardSummary;

/// Placeholder shown while the summary loads.
pub const LOADING_PLACEHOLDER: &str = "…";

/// One rendered counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub title: &'static str,
    pub value: String,
    pub accent: Color32,
}

#[derive(Default)]
pub struct DashboardPanel {
    summary: Fetch<(), DashboardSummary>,
}

impl DashboardPanel {
    /// Counter values for the current state. Missing totals read as zero.
    pub fn counters(&self, currency: &str) -> [Counter; 4] {
        let loading = self.summary.is_loading();
        let totals = self.summary.data().map(|s| s.totals.clone()).unwrap_or_default();

        let value = |v: String| {
            if loading {
                LOADING_PLACEHOLDER.to_string()
            } else {
                v
            }
        };

        [
            Counter {
                title: "POs",
                value: value(totals.purchase_orders().to_string()),
                accent: colors::SKY,
            },
            Counter {
                title: "Invoices",
                value: value(totals.invoices().to_string()),
                accent: colors::INDIGO,
            },
            Counter {
                title: "Paid",
                value: value(totals.paid_invoices().to_string()),
                accent: colors::EMERALD,
            },
            Counter {
                title: "Outstanding",
                value: value(format!("{currency}{}", totals.outstanding_amount())),
                accent: colors::RED,
            },
        ]
    }
}

impl Panel for DashboardPanel {
    fn refresh(&mut self, backend: &Backend) {
        let api = backend.api.clone();
        self.summary
            .ensure((), &backend.rt, move |_| async move { api.dashboard_summary().await });
    }

    fn poll(&mut self) -> Option<PanelEvent> {
        self.summary.poll();
        None
    }

    fn is_busy(&self) -> bool {
        self.summary.is_loading()
    }

    fn error(&self) -> Option<&AppError> {
        self.summary.error()
    }

    fn render(&mut self, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent> {
        let counters = self.counters(&ctx.currency);

        ui.columns(counters.len(), |columns| {
            for (column, counter) in columns.iter_mut().zip(&counters) {
                stat_card(column, counter.title, &counter.value, counter.accent);
            }
        });

        None
    }
}
