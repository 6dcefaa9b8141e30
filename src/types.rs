//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing raw samples, aggregated chart points, and the data binding
//! handed to the chart renderer.

use serde::{Deserialize, Serialize};

/// One raw timestamped observation from the input dataset.
///
/// Samples are immutable once loaded; the input order is preserved and is
/// not required to be chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Calendar date or datetime string, e.g. `2024-01-15` or
    /// `2024-01-15T09:30:00`
    pub timestamp: String,
    /// The observed value
    pub value: f64,
}

/// The mean value of all samples assigned to one calendar bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    /// Bucket key: the week's Sunday as `YYYY-MM-DD`, or `YYYY-MM` for a month
    pub timestamp: String,
    /// Unweighted arithmetic mean of the contributing sample values
    pub value: f64,
}

/// Aggregation unit for bucketing samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Calendar week, starting on Sunday
    Week,
    /// Calendar month
    Month,
}

/// The user-selected aggregation view.
///
/// Session-lifetime state, mutated only by explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// The bucketing unit this timeframe asks for.
    ///
    /// `Daily` requests no aggregation at all; the raw samples are used
    /// as-is and the aggregator is never invoked.
    pub fn granularity(self) -> Option<Granularity> {
        match self {
            Timeframe::Daily => None,
            Timeframe::Weekly => Some(Granularity::Week),
            Timeframe::Monthly => Some(Granularity::Month),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }
}

/// The two parallel sequences bound to the chart renderer: one label and
/// one value per point, in the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Bind raw samples directly, unmodified and in original order.
    pub fn from_samples(samples: &[Sample]) -> Self {
        Self {
            labels: samples.iter().map(|s| s.timestamp.clone()).collect(),
            values: samples.iter().map(|s| s.value).collect(),
        }
    }

    /// Bind aggregated points, preserving their bucket order.
    pub fn from_points(points: &[AggregatedPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| p.timestamp.clone()).collect(),
            values: points.iter().map(|p| p.value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The visible fraction of the series along the x axis, as `[start, end]`
/// fractions of the full range. The full series is `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }
}

impl ViewWindow {
    /// Smallest span the window can be zoomed down to.
    pub const MIN_SPAN: f64 = 0.01;

    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Shift the window by `delta` (a fraction of the full range),
    /// clamped so it never leaves `[0, 1]`.
    pub fn shifted(self, delta: f64) -> Self {
        let span = self.span();
        let start = (self.start + delta).clamp(0.0, 1.0 - span);
        Self {
            start,
            end: start + span,
        }
    }

    /// Scale the span about the window center. `factor < 1` zooms in.
    pub fn zoomed(self, factor: f64) -> Self {
        let center = (self.start + self.end) / 2.0;
        let span = (self.span() * factor).clamp(Self::MIN_SPAN, 1.0);
        let start = (center - span / 2.0).clamp(0.0, 1.0 - span);
        Self {
            start,
            end: start + span,
        }
    }

    /// Half-open index range of the visible slice of a series of `len`
    /// points. A non-empty series always yields at least one point.
    pub fn slice_bounds(self, len: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        let start = ((self.start * len as f64).floor() as usize).min(len - 1);
        let end = ((self.end * len as f64).ceil() as usize).clamp(start + 1, len);
        (start, end)
    }
}
