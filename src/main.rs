//! Time-Series Chart Viewer
//!
//! A GUI application for exploring a timestamped value series with
//! daily/weekly/monthly aggregation and PNG export.

use anyhow::Context;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use chartview::app::{App, AppWrapper};
use chartview::plotting::{self, ChartTheme};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // The dataset is read exactly once, before any UI exists.
    let samples = chartview::data::load_dataset().context("failed to load the bundled dataset")?;
    info!(samples = samples.len(), "dataset loaded");

    // One-time chart setup, before the first render.
    if !plotting::init(ChartTheme::default()) {
        warn!("chart theme was already initialized");
    }

    // Initialize the Tokio runtime for export tasks
    let rt = Runtime::new().context("failed to start async runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("Chart Application"),
            ..Default::default()
        };

        if let Err(e) = eframe::run_native(
            "Chart Application",
            options,
            Box::new(move |cc| {
                // Configure default fonts and style
                let fonts = egui::FontDefinitions::default();
                cc.egui_ctx.set_fonts(fonts);

                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(samples)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        ) {
            error!("error running application: {e}");
        }
    });

    Ok(())
}
