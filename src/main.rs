//! Ops Dashboard - Desktop admin for customers, purchase orders, invoices and agreements.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use ops_dashboard as app;
use tracing_subscriber::prelude::*;

use app::config::{AppConfig, BACKEND_URL_ENV, ConfigLoadResult};
use app::ui::App;

/// Desktop admin for customers, purchase orders, invoices and agreements.
#[derive(Parser)]
#[command(name = "ops-dashboard")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Load configuration from this file
    #[arg(long, conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and BACKEND_URL
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stdout and a daily file; the guard flushes the file on exit
    let _log_guard = init_logging();

    tracing::info!("Ops Dashboard starting...");

    // Determine config path based on mode
    let config_path = if let Some(path) = cli.config.clone() {
        path
    } else if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (mut config, startup_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, using defaults");
            (AppConfig::default(), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (
                AppConfig::default(),
                Some(format!("Invalid configuration, using defaults: {e}")),
            )
        }
    };

    config.apply_overrides(std::env::var(BACKEND_URL_ENV).ok(), cli.base_url);
    config
        .validate()
        .with_context(|| format!("invalid backend URL {:?}", config.api.base_url))?;
    tracing::info!("Backend: {}", config.api.base_url);

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    let app = App::new(config, config_path, rt, startup_error).context("failed to create API client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ops Dashboard")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ops Dashboard",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}

/// Install the stdout and rolling file subscribers.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "ops-dashboard.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}
