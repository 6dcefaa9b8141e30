use eframe::App as EApp;
use egui::TextureHandle;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::aggregate::{aggregate, AggregateError};
use crate::plotting::ChartOptions;
use crate::types::{ChartSeries, Sample, Timeframe, ViewWindow};

/// Outcome of the most recent export request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    InProgress,
    Done(PathBuf),
    Failed(String),
}

/// Main application state
///
/// Owns the raw dataset, the selected timeframe, and everything derived
/// from them. Derived state is replaced wholesale on every recomputation,
/// never mutated in place.
#[derive(Clone)]
pub struct App {
    pub samples: Vec<Sample>,
    pub timeframe: Timeframe,
    pub chart_series: ChartSeries,
    pub view_window: ViewWindow,
    pub options: ChartOptions,
    pub chart_texture: Option<TextureHandle>,
    pub inspected_point: Option<(String, f64)>,
    pub export_status: ExportStatus,
    pub error_message: Option<String>,
    pub update_needed: bool,
}

/// Produce the label/value binding for a timeframe.
///
/// Daily hands the raw samples through untouched and in original order;
/// the aggregator is not invoked at all. Weekly and monthly run the
/// bucketing pass over the full raw dataset.
pub fn build_series(
    samples: &[Sample],
    timeframe: Timeframe,
) -> Result<ChartSeries, AggregateError> {
    match timeframe.granularity() {
        None => Ok(ChartSeries::from_samples(samples)),
        Some(granularity) => Ok(ChartSeries::from_points(&aggregate(samples, granularity)?)),
    }
}

impl App {
    pub fn new(samples: Vec<Sample>) -> Self {
        let mut app = Self {
            samples,
            ..Self::default()
        };
        match build_series(&app.samples, app.timeframe) {
            Ok(series) => app.chart_series = series,
            Err(e) => app.error_message = Some(e.to_string()),
        }
        app.update_needed = true;
        app
    }

    /// Switch the aggregation view.
    ///
    /// The derived series is recomputed from the full raw dataset and
    /// replaced wholesale (last write wins, no queuing); pan/zoom and the
    /// inspected point reset with it. On an aggregation error the prior
    /// view is kept and the failure is surfaced instead.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        if self.timeframe == timeframe {
            return;
        }

        match build_series(&self.samples, timeframe) {
            Ok(series) => {
                info!(timeframe = timeframe.label(), points = series.len(), "timeframe changed");
                self.timeframe = timeframe;
                self.chart_series = series;
                self.view_window = ViewWindow::default();
                self.inspected_point = None;
                self.error_message = None;
                self.update_needed = true;
            }
            Err(e) => {
                error!("aggregation failed: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Drag pan: shift the visible window by a fraction of the full
    /// range. Ignored unless panning is enabled on the x axis.
    pub fn pan_by(&mut self, delta: f64) {
        if !self.options.pan.enabled || !self.options.pan.mode.includes_x() {
            return;
        }
        let shifted = self.view_window.shifted(delta);
        if shifted != self.view_window {
            self.view_window = shifted;
            self.update_needed = true;
        }
    }

    /// Wheel or pinch zoom about the window center. The caller has
    /// already checked which gesture is enabled; this only honors the
    /// configured axis mode.
    pub fn zoom_by(&mut self, factor: f64) {
        if !self.options.zoom.mode.includes_x() {
            return;
        }
        let zoomed = self.view_window.zoomed(factor);
        if zoomed != self.view_window {
            self.view_window = zoomed;
            self.update_needed = true;
        }
    }

    /// Click-to-inspect: map a click at `frac` (0..1 across the plot
    /// area) to the nearest visible point and remember it for display.
    pub fn inspect_at(&mut self, frac: f64) {
        let (start, end) = self.view_window.slice_bounds(self.chart_series.len());
        if start >= end {
            return;
        }
        let visible = end - start;
        let offset = ((frac.clamp(0.0, 1.0) * visible as f64) as usize).min(visible - 1);
        let index = start + offset;

        let label = self.chart_series.labels[index].clone();
        let value = self.chart_series.values[index];
        info!(%label, value, "point inspected");
        self.inspected_point = Some((label, value));
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            timeframe: Timeframe::Daily,
            chart_series: ChartSeries::default(),
            view_window: ViewWindow::default(),
            options: ChartOptions::default(),
            chart_texture: None,
            inspected_point: None,
            export_status: ExportStatus::Idle,
            error_message: None,
            update_needed: false,
        }
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            error!("failed to acquire app lock in update");
        }
    }
}
