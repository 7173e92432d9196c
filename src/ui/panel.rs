//! Common shape of the tab panels.

use std::path::PathBuf;

use eframe::egui::Ui;

use crate::api::Backend;
use crate::error::AppError;
use crate::fetch::Submission;

/// Shared inputs every panel renders with.
#[derive(Clone)]
pub struct PanelContext {
    pub backend: Backend,
    pub currency: String,
}

/// Something a panel wants the shell to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A record was created; the shell schedules a full reload.
    Saved(&'static str),
    /// A list was written to disk.
    Exported(PathBuf),
    ExportFailed(String),
}

/// A tab's controller: fetches, form drafts, and rendering.
///
/// A panel is mounted by constructing it with `Default` and unmounted by
/// dropping it; dropping discards any responses still in flight.
pub trait Panel: Default {
    /// Issue GETs whose dependency keys changed since the last call.
    fn refresh(&mut self, backend: &Backend);

    /// Drain finished requests.
    fn poll(&mut self) -> Option<PanelEvent>;

    /// Whether any request is still outstanding.
    fn is_busy(&self) -> bool;

    /// Most recent request failure, if any.
    fn error(&self) -> Option<&AppError>;

    fn render(&mut self, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent>;

    /// Hand over a write still in flight so it outlives the panel.
    fn take_pending_write(&mut self) -> Option<Submission> {
        None
    }
}

/// Run one frame of a panel: apply responses, re-fetch, then draw.
pub fn show<P: Panel>(panel: &mut P, ctx: &PanelContext, ui: &mut Ui) -> Option<PanelEvent> {
    let polled = panel.poll();
    panel.refresh(&ctx.backend);
    let rendered = panel.render(ctx, ui);
    polled.or(rendered)
}
