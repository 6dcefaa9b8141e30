//! # Time-Series Chart Viewer Library
//!
//! `chartview` is a library for visualizing a timestamped value series as
//! an interactive line chart. It aggregates raw samples into calendar
//! buckets and drives a desktop widget with pan, zoom, point inspection,
//! and PNG export.
//!
//! ## Features
//!
//! - Daily, weekly, and monthly aggregation views
//! - Calendar bucketing with arithmetic-mean reduction
//! - Pan and zoom along the time axis
//! - Click a data point to inspect its value
//! - Export the current view as a PNG image
//!
//! ## Example
//!
//! ```no_run
//! use chartview::app::AppWrapper;
//! use chartview::ChartApp;
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! // Create a new application instance over the bundled dataset
//! let samples = chartview::data::load_dataset().unwrap();
//! let app = Arc::new(Mutex::new(ChartApp::new(samples)));
//! let app_wrapper = AppWrapper { app };
//!
//! // Run the application with eframe
//! eframe::run_native(
//!     "Chart Application",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod aggregate;
pub mod app;
pub mod data;
pub mod plotting;
pub mod types;

// Re-export main types for convenience
pub use aggregate::{aggregate, AggregateError};
pub use app::App as ChartApp;
pub use types::{AggregatedPoint, ChartSeries, Granularity, Sample, Timeframe};
