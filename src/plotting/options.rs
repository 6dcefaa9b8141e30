//! Chart interaction and layout options.
//!
//! Every option the chart view recognizes is a named field with a
//! documented default, replacing the dynamically-typed configuration
//! object such options usually travel in. The fourth recognized option,
//! the point-click handler, is wired as a widget response callback in the
//! view code rather than stored here.

/// Axis a pan or zoom gesture applies to.
///
/// The renderer auto-scales the y axis to the visible data, so only the
/// `X` component of a mode has an effect; `Y` leaves the gesture inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisMode {
    /// Horizontal only
    #[default]
    X,
    /// Vertical only
    Y,
    /// Both axes
    XY,
}

impl AxisMode {
    pub fn includes_x(self) -> bool {
        matches!(self, AxisMode::X | AxisMode::XY)
    }
}

/// Drag-to-pan behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanOptions {
    /// Whether dragging the chart pans the view. Default: `true`.
    pub enabled: bool,
    /// Axis the pan applies to. Default: [`AxisMode::X`].
    pub mode: AxisMode,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: AxisMode::X,
        }
    }
}

/// Wheel and pinch zoom behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomOptions {
    /// Whether the scroll wheel zooms the view. Default: `true`.
    pub wheel: bool,
    /// Whether a touch pinch gesture zooms the view. Default: `true`.
    pub pinch: bool,
    /// Axis the zoom applies to. Default: [`AxisMode::X`].
    pub mode: AxisMode,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            wheel: true,
            pinch: true,
            mode: AxisMode::X,
        }
    }
}

/// Legend placement within the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Every option the chart view recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartOptions {
    pub pan: PanOptions,
    pub zoom: ZoomOptions,
    /// Legend placement. Default: [`LegendPosition::Top`].
    pub legend: LegendPosition,
}
