//! One-shot PNG export of the current chart view.
//!
//! Export renders the visible window at export resolution and writes the
//! image next to the process. Failures are typed and reported to the
//! user, never silently dropped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::chart::render_chart;
use super::options::ChartOptions;
use crate::types::{ChartSeries, ViewWindow};

/// Pixel size of exported images.
const EXPORT_SIZE: (u32, u32) = (1280, 720);

/// Why an export produced no artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the chart has no data")]
    EmptyChart,
    #[error("failed to render chart image: {0}")]
    Render(String),
}

/// First free artifact name in `dir`: `chart.png`, then `chart-1.png`,
/// `chart-2.png`, … so overlapping exports never clobber an earlier file.
pub fn resolve_export_path(dir: &Path) -> PathBuf {
    let base = dir.join("chart.png");
    if !base.exists() {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("chart-{n}.png"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Render the current view at export resolution and write it to `path`.
pub fn export_chart(
    series: &ChartSeries,
    window: ViewWindow,
    options: &ChartOptions,
    path: &Path,
) -> Result<(), ExportError> {
    if series.is_empty() {
        return Err(ExportError::EmptyChart);
    }

    render_chart(series, window, options, path, EXPORT_SIZE)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    info!(path = %path.display(), "chart exported");
    Ok(())
}
