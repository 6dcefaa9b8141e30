use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;

use super::options::{ChartOptions, LegendPosition};
use super::styles::ChartStyle;
use crate::types::{ChartSeries, ViewWindow};

type PlotError = Box<dyn Error + Send + Sync>;

// Rendered-PNG cache so flipping between timeframes does not redraw an
// identical image.
static CHART_CACHE: Lazy<Mutex<LruCache<ChartCacheKey, Vec<u8>>>> = Lazy::new(|| {
    Mutex::new(LruCache::new(NonZeroUsize::new(10).unwrap())) // Cache up to 10 renders
});

#[derive(Hash, Eq, PartialEq)]
struct ChartCacheKey {
    data_hash: u64,
    window: (u64, u64),
    size: (u32, u32),
}

impl ChartCacheKey {
    fn new(series: &ChartSeries, window: ViewWindow, size: (u32, u32)) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        series.labels.hash(&mut hasher);
        for value in &series.values {
            value.to_bits().hash(&mut hasher);
        }

        Self {
            data_hash: hasher.finish(),
            window: (window.start.to_bits(), window.end.to_bits()),
            size,
        }
    }
}

// Helper function to wrap errors
fn wrap_err<E>(e: E) -> PlotError
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    e.into()
}

/// Render the visible window of the series into a PNG file at `path`.
pub fn render_chart(
    series: &ChartSeries,
    window: ViewWindow,
    options: &ChartOptions,
    path: &Path,
    size: (u32, u32),
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_chart(series, window, options, &root)?;
    root.present()?;
    Ok(())
}

/// Render the visible window of the series to in-memory PNG bytes.
///
/// The bitmap backend draws into a file, so the image goes through a
/// temporary file and is read back for texture upload. Identical renders
/// are served from the LRU cache.
pub fn render_chart_png(
    series: &ChartSeries,
    window: ViewWindow,
    options: &ChartOptions,
    size: (u32, u32),
) -> Result<Vec<u8>, PlotError> {
    let cache_key = ChartCacheKey::new(series, window, size);

    if let Ok(mut cache) = CHART_CACHE.lock() {
        if let Some(bytes) = cache.get(&cache_key) {
            return Ok(bytes.clone());
        }
    }

    let file = tempfile::Builder::new()
        .prefix("chartview")
        .suffix(".png")
        .tempfile()?;
    render_chart(series, window, options, file.path(), size)?;
    let bytes = std::fs::read(file.path())?;

    if let Ok(mut cache) = CHART_CACHE.lock() {
        cache.put(cache_key, bytes.clone());
    }

    Ok(bytes)
}

/// Internal function to draw the chart onto a drawing area
fn draw_chart(
    series: &ChartSeries,
    window: ViewWindow,
    options: &ChartOptions,
    root_area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), PlotError> {
    let theme = super::theme();
    let style = ChartStyle::default();

    root_area.fill(&theme.background_color).map_err(wrap_err)?;

    let (start, end) = window.slice_bounds(series.len());
    let labels = &series.labels[start..end];
    let values = &series.values[start..end];
    if values.is_empty() {
        return Ok(());
    }

    let (min_val, max_val) = value_range(values);

    let mut chart_builder = ChartBuilder::on(root_area)
        .caption(
            "Value Over Time",
            ("sans-serif", 30).into_font().color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..(values.len() as f64), min_val..max_val)?;

    let mut mesh = chart_builder.configure_mesh();

    // Store the labels in a longer-lived variable
    let labels_clone = labels.to_vec();
    let x_label_formatter = move |x: &f64| {
        let idx = *x as usize;
        if idx < labels_clone.len() {
            // Show fewer labels to prevent overlap
            if idx == 0
                || idx == labels_clone.len() - 1
                || (idx % (labels_clone.len() / 4).max(1) == 0
                    && idx > 0
                    && idx < labels_clone.len() - 1)
            {
                labels_clone[idx].clone()
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    };

    mesh.light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Value")
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        // Rotate x labels for better readability
        .x_label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        // Use K/M formatting for large numbers
        .y_label_formatter(&|y| {
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1_000.0 {
                format!("{:.1}K", y / 1_000.0)
            } else {
                format!("{:.1}", y)
            }
        });

    mesh.draw()?;

    draw_grid(&mut chart_builder, values.len() as f64).map_err(wrap_err)?;
    draw_value_series(&mut chart_builder, values, &style).map_err(wrap_err)?;

    chart_builder
        .configure_series_labels()
        .position(legend_position(options.legend))
        .background_style(theme.background_color)
        .border_style(theme.grid_color)
        .label_font(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .draw()?;

    Ok(())
}

fn draw_value_series(
    chart_builder: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    values: &[f64],
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let theme = super::theme();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    // Draw a subtle glow effect under the main line
    chart_builder.draw_series(LineSeries::new(
        points.clone(),
        theme.glow_color.stroke_width(style.line_width * 2),
    ))?;

    let line_color = theme.line_color;
    chart_builder
        .draw_series(LineSeries::new(
            points.clone(),
            line_color.stroke_width(style.line_width),
        ))?
        .label("Value")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    // Point markers so individual samples stay clickable targets
    chart_builder.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), style.point_radius as i32, line_color.filled())),
    )?;

    Ok(())
}

fn draw_grid(
    chart_builder: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x_max: f64,
) -> Result<(), PlotError> {
    let theme = super::theme();
    let grid_style = ShapeStyle::from(&theme.grid_color).stroke_width(1);
    let major_grid_style = ShapeStyle::from(&theme.axis_color.mix(0.25)).stroke_width(2);

    let y_range = chart_builder.y_range();
    let y_min = y_range.start;
    let y_max = y_range.end;
    let y_span = y_max - y_min;

    // Calculate nice grid intervals
    let y_interval = if y_span > 1_000_000.0 {
        100_000.0
    } else if y_span > 100_000.0 {
        10_000.0
    } else if y_span > 10_000.0 {
        1_000.0
    } else if y_span > 1_000.0 {
        100.0
    } else if y_span > 100.0 {
        10.0
    } else if y_span > 10.0 {
        1.0
    } else if y_span > 1.0 {
        0.1
    } else {
        0.01
    };

    // Draw both major and minor grid lines
    let steps = (y_span / y_interval).ceil() as i32;
    let y_start = (y_min / y_interval).floor() * y_interval;

    for i in 0..=steps {
        let y = y_start + i as f64 * y_interval;
        if y > y_max {
            break;
        }
        let style = if i % 5 == 0 {
            major_grid_style
        } else {
            grid_style
        };
        chart_builder.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, y), (x_max, y)],
            style,
        )))?;
    }

    Ok(())
}

/// Y-axis range for the visible values, with headroom so the line never
/// touches the plot border. A flat series gets a unit band around it.
fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        min = min.min(value);
        max = max.max(value);
    }

    if min >= max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

fn legend_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::Top => SeriesLabelPosition::UpperMiddle,
        LegendPosition::Bottom => SeriesLabelPosition::LowerMiddle,
        LegendPosition::Left => SeriesLabelPosition::MiddleLeft,
        LegendPosition::Right => SeriesLabelPosition::MiddleRight,
    }
}
