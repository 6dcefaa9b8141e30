//! Chart rendering, one-time theme setup, and PNG export.

use once_cell::sync::OnceCell;
use tracing::warn;

mod chart;
mod export;
mod options;
mod styles;


pub use chart::{render_chart, render_chart_png};
pub use export::{export_chart, resolve_export_path, ExportError};
pub use options::{AxisMode, ChartOptions, LegendPosition, PanOptions, ZoomOptions};
pub use styles::{ChartStyle, ChartTheme};

static THEME: OnceCell<ChartTheme> = OnceCell::new();

/// Install the process-wide chart theme.
///
/// Call once before the first render; there is no teardown for a
/// single-session widget. Returns `false` if a theme was already
/// installed, leaving the original in place.
pub fn init(theme: ChartTheme) -> bool {
    THEME.set(theme).is_ok()
}

/// The installed theme, or the defaults (with a warning) when rendering
/// starts before [`init`] ran.
pub(crate) fn theme() -> &'static ChartTheme {
    THEME.get_or_init(|| {
        warn!("chart rendered before plotting::init; using the default theme");
        ChartTheme::default()
    })
}
