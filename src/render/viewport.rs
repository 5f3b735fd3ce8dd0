use crate::foundation::core::{Canvas, Point, Rect};
use crate::path::dataset::PathDataset;

/// Fraction of the larger data extent added on every side.
pub const MARGIN_FRACTION: f64 = 0.1;

/// Margin used when every point coincides and the extent is zero.
pub const DEGENERATE_MARGIN: f64 = 1.0;

/// Fraction of the shorter canvas side kept free around the plot box.
const PLOT_PADDING_FRACTION: f64 = 0.12;

/// Fixed data-space window shared by every frame of one animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left bound.
    pub x_min: f64,
    /// Right bound.
    pub x_max: f64,
    /// Bottom bound.
    pub y_min: f64,
    /// Top bound.
    pub y_max: f64,
    /// Margin applied on each side.
    pub margin: f64,
}

impl Viewport {
    /// Compute the viewport of the whole dataset, or `None` when it is empty.
    ///
    /// `margin = 10% * max(x extent, y extent)`, applied to both axes.
    pub fn from_dataset(dataset: &PathDataset) -> Option<Self> {
        dataset.bounds().map(Self::from_bounds)
    }

    /// Compute the viewport for data bounds.
    pub fn from_bounds(bounds: Rect) -> Self {
        let extent = bounds.width().max(bounds.height());
        let margin = if extent > 0.0 {
            extent * MARGIN_FRACTION
        } else {
            DEGENERATE_MARGIN
        };
        Self {
            x_min: bounds.x0 - margin,
            x_max: bounds.x1 + margin,
            y_min: bounds.y0 - margin,
            y_max: bounds.y1 + margin,
            margin,
        }
    }

    /// Horizontal span.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical span.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Maps data space to pixel space with a locked 1:1 aspect ratio.
///
/// The larger viewport span fills the square plot box; the other axis is centred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    viewport: Viewport,
    canvas: Canvas,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl PlotLayout {
    /// Fit `viewport` into `canvas`.
    pub fn new(viewport: Viewport, canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let pad = w.min(h) * PLOT_PADDING_FRACTION;
        let side = (w.min(h) - 2.0 * pad).max(1.0);
        let scale = side / viewport.width().max(viewport.height());
        Self {
            viewport,
            canvas,
            scale,
            offset_x: (w - viewport.width() * scale) / 2.0,
            offset_y: (h - viewport.height() * scale) / 2.0,
        }
    }

    /// Viewport this layout maps from.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Canvas this layout maps to.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Data point to pixel position. Pixel `y` grows downwards.
    pub fn to_pixel(&self, p: Point) -> Point {
        let x = self.offset_x + (p.x - self.viewport.x_min) * self.scale;
        let y = self.offset_y + (p.y - self.viewport.y_min) * self.scale;
        Point::new(x, f64::from(self.canvas.height) - y)
    }

    /// Pixel rectangle covered by the viewport.
    pub fn plot_rect(&self) -> Rect {
        let a = self.to_pixel(Point::new(self.viewport.x_min, self.viewport.y_min));
        let b = self.to_pixel(Point::new(self.viewport.x_max, self.viewport.y_max));
        Rect::from_points(a, b)
    }
}

/// Nice (1/2/5 x 10^k) tick positions inside `[lo, hi]` and their spacing.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Ticks {
    pub(crate) step: f64,
    pub(crate) values: Vec<f64>,
}

/// Evenly spaced "nice" tick positions inside `[lo, hi]`, at most `target + 1` of them.
///
/// Far from the origin `step` can fall below the float spacing of the coordinates; positions
/// that round to the same value are collapsed.
pub(crate) fn grid_ticks(lo: f64, hi: f64, target: usize) -> Ticks {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return Ticks {
            step: 0.0,
            values: Vec::new(),
        };
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);

    let first = (lo / step).ceil() * step;
    let count = ((hi - first) / step).floor().max(0.0) as usize + 1;
    let mut values: Vec<f64> = (0..count.min(target + 1))
        .map(|i| first + i as f64 * step)
        .filter(|t| *t <= hi)
        .collect();
    values.dedup();
    Ticks { step, values }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
