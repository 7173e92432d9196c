//! Main application UI.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{FILE_TEXT, RECEIPT, SIGNATURE, USERS};
use tokio::sync::mpsc;

use crate::api::{ApiClient, Backend};
use crate::config::{self, AppConfig};
use crate::error::AppError;
use crate::fetch::Submission;

use super::agreement_panel::AgreementsPanel;
use super::components::{colors, section};
use super::customers_panel::CustomersPanel;
use super::dashboard::DashboardPanel;
use super::invoice_panel::InvoicesPanel;
use super::panel::{self, Panel, PanelContext, PanelEvent};
use super::po_panel::PurchaseOrdersPanel;

/// Tab currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Customers,
    PurchaseOrders,
    Invoices,
    Agreements,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Customers,
        Tab::PurchaseOrders,
        Tab::Invoices,
        Tab::Agreements,
    ];

    /// Get the display name for the tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Customers => "Customers",
            Tab::PurchaseOrders => "POs",
            Tab::Invoices => "Invoices",
            Tab::Agreements => "Agreements",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => FILE_TEXT,
            Tab::Customers => USERS,
            Tab::PurchaseOrders => RECEIPT,
            Tab::Invoices => FILE_TEXT,
            Tab::Agreements => SIGNATURE,
        }
    }

    /// Title of the section wrapping the tab's panel.
    pub fn section_title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Overview",
            Tab::Customers => "Manage Customers",
            Tab::PurchaseOrders => "Manage Purchase Orders",
            Tab::Invoices => "Manage Invoices",
            Tab::Agreements => "Agreements & NDAs",
        }
    }
}

/// Deadline for the full reload that follows a write.
#[derive(Debug, Default)]
pub struct ReloadSchedule {
    deadline: Option<Instant>,
}

impl ReloadSchedule {
    /// Set the deadline. A later write replaces an earlier deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the deadline, if one is set.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the deadline once it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// State of every tab's panel.
#[derive(Default)]
pub struct Panels {
    pub dashboard: DashboardPanel,
    pub customers: CustomersPanel,
    pub purchase_orders: PurchaseOrdersPanel,
    pub invoices: InvoicesPanel,
    pub agreements: AgreementsPanel,
}

impl Panels {
    /// Drop a tab's state. Its next show starts from scratch.
    pub fn unmount(&mut self, tab: Tab) {
        match tab {
            Tab::Dashboard => self.dashboard = DashboardPanel::default(),
            Tab::Customers => self.customers = CustomersPanel::default(),
            Tab::PurchaseOrders => self.purchase_orders = PurchaseOrdersPanel::default(),
            Tab::Invoices => self.invoices = InvoicesPanel::default(),
            Tab::Agreements => self.agreements = AgreementsPanel::default(),
        }
    }

    pub fn is_busy(&self, tab: Tab) -> bool {
        match tab {
            Tab::Dashboard => self.dashboard.is_busy(),
            Tab::Customers => self.customers.is_busy(),
            Tab::PurchaseOrders => self.purchase_orders.is_busy(),
            Tab::Invoices => self.invoices.is_busy(),
            Tab::Agreements => self.agreements.is_busy(),
        }
    }

    /// Take the tab's in-flight write, if any.
    pub fn take_pending_write(&mut self, tab: Tab) -> Option<Submission> {
        match tab {
            Tab::Dashboard => self.dashboard.take_pending_write(),
            Tab::Customers => self.customers.take_pending_write(),
            Tab::PurchaseOrders => self.purchase_orders.take_pending_write(),
            Tab::Invoices => self.invoices.take_pending_write(),
            Tab::Agreements => self.agreements.take_pending_write(),
        }
    }

    pub fn error(&self, tab: Tab) -> Option<&AppError> {
        match tab {
            Tab::Dashboard => self.dashboard.error(),
            Tab::Customers => self.customers.error(),
            Tab::PurchaseOrders => self.purchase_orders.error(),
            Tab::Invoices => self.invoices.error(),
            Tab::Agreements => self.agreements.error(),
        }
    }
}

/// Navigation and panel state, reset as a whole on reload.
#[derive(Default)]
pub struct Shell {
    tab: Tab,
    pub panels: Panels,
    reload: ReloadSchedule,
    /// Writes started on a tab that has since been left.
    detached_writes: Vec<Submission>,
}

impl Shell {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tabs, unmounting the one being left.
    ///
    /// Returns `false` when `tab` is already active.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if tab == self.tab {
            return false;
        }
        tracing::debug!("Tab {} -> {}", self.tab.name(), tab.name());
        if let Some(write) = self.panels.take_pending_write(self.tab) {
            self.detached_writes.push(write);
        }
        self.panels.unmount(self.tab);
        self.tab = tab;
        true
    }

    pub fn schedule_reload(&mut self, now: Instant, delay: Duration) {
        self.reload.schedule(now, delay);
    }

    pub fn reload_pending(&self) -> bool {
        self.reload.is_pending()
    }

    pub fn reload_remaining(&self, now: Instant) -> Option<Duration> {
        self.reload.remaining(now)
    }

    pub fn has_detached_writes(&self) -> bool {
        !self.detached_writes.is_empty()
    }

    /// Drain writes whose tab was left. A success schedules the reload the
    /// tab would have scheduled.
    pub fn poll_detached_writes(&mut self, now: Instant, delay: Duration) {
        let mut saved = false;
        self.detached_writes.retain_mut(|write| match write.poll() {
            Some(ok) => {
                saved |= ok;
                false
            }
            None => true,
        });
        if saved {
            tracing::info!("Background write finished, reloading in {} ms", delay.as_millis());
            self.reload.schedule(now, delay);
        }
    }

    /// Discard all state and start over on the first tab.
    pub fn reload(&mut self) {
        tracing::info!("Reloading application state");
        *self = Self::default();
    }

    /// Perform a scheduled reload once due. Returns `true` if it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.reload.take_due(now) {
            self.reload();
            true
        } else {
            false
        }
    }

    pub fn is_busy(&self) -> bool {
        self.panels.is_busy(self.tab) || self.has_detached_writes()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.panels.error(self.tab)
    }

    /// Run one frame of the active panel.
    pub fn show_active(&mut self, ctx: &PanelContext, ui: &mut egui::Ui) -> Option<PanelEvent> {
        match self.tab {
            Tab::Dashboard => panel::show(&mut self.panels.dashboard, ctx, ui),
            Tab::Customers => panel::show(&mut self.panels.customers, ctx, ui),
            Tab::PurchaseOrders => panel::show(&mut self.panels.purchase_orders, ctx, ui),
            Tab::Invoices => panel::show(&mut self.panels.invoices, ctx, ui),
            Tab::Agreements => panel::show(&mut self.panels.agreements, ctx, ui),
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime must outlive every spawned request
    _rt: tokio::runtime::Runtime,

    config: AppConfig,
    config_path: PathBuf,
    context: PanelContext,
    shell: Shell,

    // Dialogs
    error_message: Option<String>,
    success_message: Option<String>,

    // Backend settings dialog
    settings_open: bool,
    settings_url_input: String,
    settings_test_rx: Option<mpsc::UnboundedReceiver<Result<(), String>>>,
    settings_test_status: Option<Result<(), String>>,
}

impl App {
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
        startup_error: Option<String>,
    ) -> crate::Result<Self> {
        let api = ApiClient::new(&config.api.base_url, request_timeout(&config))?;
        let context = PanelContext {
            backend: Backend::new(api, rt.handle().clone()),
            currency: config.ui.currency_symbol.clone(),
        };

        Ok(Self {
            _rt: rt,
            settings_url_input: config.api.base_url.clone(),
            config,
            config_path,
            context,
            shell: Shell::default(),
            error_message: startup_error,
            success_message: None,
            settings_open: false,
            settings_test_rx: None,
            settings_test_status: None,
        })
    }

    fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Saved(label) => {
                tracing::info!("Saved {label}, reloading in {} ms", self.config.ui.reload_delay_ms);
                self.shell
                    .schedule_reload(Instant::now(), Duration::from_millis(self.config.ui.reload_delay_ms));
            }
            PanelEvent::Exported(path) => {
                tracing::info!("Exported to {}", path.display());
                self.success_message = Some(format!("Exported to: {}", path.display()));
            }
            PanelEvent::ExportFailed(e) => {
                tracing::error!("Export failed: {e}");
                self.error_message = Some(format!("Export failed: {e}"));
            }
        }
    }

    /// Start a connection test against the URL in the settings dialog.
    fn test_settings_connection(&mut self) {
        let url = self.settings_url_input.trim().to_string();
        if let Err(e) = config::validate_base_url(&url) {
            self.settings_test_status = Some(Err(e.to_string()));
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.settings_test_rx = Some(rx);
        self.settings_test_status = None;

        let timeout = request_timeout(&self.config).or(Some(Duration::from_secs(5)));
        self.context.backend.rt.spawn(async move {
            let result = match ApiClient::new(&url, timeout) {
                Ok(client) => client.test_connection().await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Save the backend URL, rebuild the client, and reload.
    ///
    /// Running state is left alone unless the config file was written.
    fn save_settings(&mut self) -> crate::Result<()> {
        let (config, api) = persist_backend_url(&self.config, &self.config_path, &self.settings_url_input)?;
        self.config = config;
        self.context.backend.api = api;

        tracing::info!("Backend set to {}", self.config.api.base_url);
        self.shell.reload();
        Ok(())
    }

    fn poll_settings_test(&mut self) {
        if let Some(mut rx) = self.settings_test_rx.take() {
            match rx.try_recv() {
                Ok(result) => {
                    self.settings_test_status = Some(result);
                }
                Err(mpsc::error::TryRecvError::Empty) => {
                    self.settings_test_rx = Some(rx);
                }
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Channel closed, keep None
                }
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("View", |ui| {
                    if ui.button("Reload").clicked() {
                        self.shell.reload();
                        ui.close();
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("Backend...").clicked() {
                        self.settings_open = true;
                        self.settings_url_input = self.config.api.base_url.clone();
                        self.settings_test_status = None;
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.label(format!("Backend: {}", self.context.backend.api.base_url()));

                    if self.shell.is_busy() {
                        ui.add_space(10.0);
                        ui.spinner();
                    }

                    if let Some(error) = self.shell.error() {
                        ui.add_space(10.0);
                        let text = if error.is_unreachable() {
                            "Backend unreachable"
                        } else {
                            "Request failed"
                        };
                        ui.colored_label(colors::ERROR, text);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.shell.reload_pending() {
                            ui.colored_label(colors::WARNING, "Refreshing...");
                        }
                    });
                });
            });
    }

    /// Render backend settings dialog.
    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut open = true;
        egui::Window::new("Backend Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Backend URL:");
                        ui.add(egui::TextEdit::singleline(&mut self.settings_url_input).desired_width(260.0));
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    let testing = self.settings_test_rx.is_some();
                    if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
                        self.test_settings_connection();
                    }

                    ui.add_space(10.0);

                    if self.settings_test_rx.is_some() {
                        ui.spinner();
                        ui.label("Testing...");
                    } else if let Some(result) = &self.settings_test_status {
                        match result {
                            Ok(()) => {
                                ui.colored_label(colors::SUCCESS, "Connection successful!");
                            }
                            Err(e) => {
                                ui.colored_label(colors::ERROR, format!("Failed: {}", e));
                            }
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.settings_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            match self.save_settings() {
                                Ok(()) => self.settings_open = false,
                                Err(e) => self.settings_test_status = Some(Err(e.to_string())),
                            }
                        }
                    });
                });
            });

        if !open {
            self.settings_open = false;
        }
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }

    /// Render header and tab strip.
    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.label(RichText::new("OPERATIONS").small().weak());
        ui.label(
            RichText::new("Customer • PO • Invoice • Agreement Dashboard")
                .size(26.0)
                .strong(),
        );
        ui.add_space(20.0);

        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                let text = RichText::new(format!("{}  {}", tab.icon(), tab.name())).size(15.0);
                if ui.selectable_label(self.shell.tab() == tab, text).clicked() {
                    self.shell.select_tab(tab);
                }
                ui.add_space(6.0);
            }
        });

        ui.add_space(15.0);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.shell
            .poll_detached_writes(now, Duration::from_millis(self.config.ui.reload_delay_ms));
        self.shell.tick(now);
        self.poll_settings_test();

        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Settings dialog
        self.show_settings_dialog(ctx);

        // Modal dialogs (error, success)
        self.show_dialogs(ctx);

        // Main content
        let mut event = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().id_salt("main_scroll").show(ui, |ui| {
                self.show_header(ui);

                let tab = self.shell.tab();
                section(ui, tab.section_title(), tab.icon(), |ui| {
                    event = self.shell.show_active(&self.context, ui);
                });
            });
        });

        if let Some(event) = event {
            self.handle_event(event);
        }

        // Keep polling while requests are outstanding
        if self.shell.is_busy() || self.settings_test_rx.is_some() {
            ctx.request_repaint();
        } else if let Some(wait) = self.shell.reload_remaining(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Validate `url`, write it to the config file, and build a client for it.
///
/// Returns the updated config and client; `current` is never modified.
fn persist_backend_url(current: &AppConfig, path: &Path, url: &str) -> crate::Result<(AppConfig, ApiClient)> {
    let url = url.trim();
    config::validate_base_url(url)?;

    let mut updated = current.clone();
    updated.api.base_url = url.to_string();
    let api = ApiClient::new(url, request_timeout(&updated))?;

    if let Err(e) = updated.save(path) {
        tracing::error!("Failed to save config: {}", e);
        return Err(e.into());
    }
    Ok((updated, api))
}

/// Configured request timeout; zero means none.
fn request_timeout(config: &AppConfig) -> Option<Duration> {
    (config.api.request_timeout_secs > 0).then(|| Duration::from_secs(config.api.request_timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tab_is_dashboard() {
        let shell = Shell::default();
        assert_eq!(shell.tab(), Tab::Dashboard);
        assert!(!shell.reload_pending());
    }

    #[test]
    fn test_select_tab_transitions() {
        let mut shell = Shell::default();
        assert!(shell.select_tab(Tab::Invoices));
        assert_eq!(shell.tab(), Tab::Invoices);
        assert!(!shell.select_tab(Tab::Invoices));
        assert!(shell.select_tab(Tab::Dashboard));
        assert_eq!(shell.tab(), Tab::Dashboard);
    }

    #[test]
    fn test_leaving_tab_drops_drafts() {
        let mut shell = Shell::default();
        shell.select_tab(Tab::Customers);
        shell.panels.customers.draft.name = "Acme Corp".to_string();

        shell.select_tab(Tab::PurchaseOrders);
        assert!(shell.panels.customers.draft.name.is_empty());
    }

    #[test]
    fn test_reload_returns_to_dashboard() {
        let mut shell = Shell::default();
        shell.select_tab(Tab::Agreements);
        shell.panels.agreements.draft.name = "NDA".to_string();

        let start = Instant::now();
        shell.schedule_reload(start, Duration::from_millis(300));
        assert!(!shell.tick(start + Duration::from_millis(100)));
        assert_eq!(shell.tab(), Tab::Agreements);

        assert!(shell.tick(start + Duration::from_millis(300)));
        assert_eq!(shell.tab(), Tab::Dashboard);
        assert!(shell.panels.agreements.draft.name.is_empty());
        assert!(!shell.reload_pending());
    }

    #[test]
    fn test_reload_schedule_remaining() {
        let mut schedule = ReloadSchedule::default();
        let start = Instant::now();
        assert_eq!(schedule.remaining(start), None);

        schedule.schedule(start, Duration::from_millis(300));
        assert_eq!(
            schedule.remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            schedule.remaining(start + Duration::from_millis(400)),
            Some(Duration::ZERO)
        );
        assert!(schedule.take_due(start + Duration::from_millis(400)));
        assert!(!schedule.take_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_tab_names_and_titles() {
        let names: Vec<_> = Tab::ALL.iter().map(Tab::name).collect();
        assert_eq!(names, ["Dashboard", "Customers", "POs", "Invoices", "Agreements"]);
        assert_eq!(Tab::Agreements.section_title(), "Agreements & NDAs");
    }

    #[test]
    fn test_persist_backend_url_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let current = AppConfig::default();

        let (updated, api) = persist_backend_url(&current, &path, " https://ops.example.com/ ").unwrap();
        assert_eq!(updated.api.base_url, "https://ops.example.com/");
        assert_eq!(api.base_url(), "https://ops.example.com");

        match AppConfig::try_load(&path) {
            config::ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded, updated),
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_persist_backend_url_failed_write_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let path = dir.path().to_path_buf();
        let current = AppConfig::default();

        let result = persist_backend_url(&current, &path, "https://ops.example.com");
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(current.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_persist_backend_url_rejects_bad_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let result = persist_backend_url(&AppConfig::default(), &path, "ftp://ops");
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let mut config = AppConfig::default();
        assert_eq!(request_timeout(&config), None);
        config.api.request_timeout_secs = 15;
        assert_eq!(request_timeout(&config), Some(Duration::from_secs(15)));
    }
}
