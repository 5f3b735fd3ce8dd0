use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Rgba8};
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::path::dataset::PathDataset;
use crate::render::viewport::{PlotLayout, Ticks, grid_ticks};

/// Colours and sizes used when compiling frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Canvas background.
    pub background: Rgba8,
    /// Grid lines.
    pub grid: Rgba8,
    /// Full trajectory drawn in every frame.
    pub reference_trace: Rgba8,
    /// Part of the trajectory revealed so far.
    pub revealed_trace: Rgba8,
    /// Current position marker.
    pub current: Rgba8,
    /// Start marker.
    pub start: Rgba8,
    /// End marker.
    pub end: Rgba8,
    /// Reference trace stroke width in pixels.
    pub reference_width: f64,
    /// Revealed trace stroke width in pixels.
    pub revealed_width: f64,
    /// Marker radius in pixels.
    pub marker_radius: f64,
    /// Title, axis labels and tick values.
    pub text: Rgba8,
    /// Title size in pixels.
    pub title_size: f64,
    /// Axis label size in pixels.
    pub axis_label_size: f64,
    /// Tick value size in pixels.
    pub tick_label_size: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::from_hex(0x1C1C1C),
            grid: Rgba8::from_hex(0x808080).with_opacity(0.3),
            reference_trace: Rgba8::from_hex(0x4A90E2).with_opacity(0.3),
            revealed_trace: Rgba8::from_hex(0x00FF00),
            current: Rgba8::from_hex(0xFF4444),
            start: Rgba8::from_hex(0x00FF00),
            end: Rgba8::from_hex(0xFF0000),
            reference_width: 1.5,
            revealed_width: 2.0,
            marker_radius: 7.0,
            text: Rgba8::from_hex(0xFFFFFF),
            title_size: 19.0,
            axis_label_size: 13.0,
            tick_label_size: 11.0,
        }
    }
}

/// Plot annotations. Empty strings are not drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotLabels {
    /// Title above the plot.
    pub title: String,
    /// Label under the x axis.
    pub x_axis: String,
    /// Label left of the y axis, drawn vertically.
    pub y_axis: String,
}

impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            title: "UAV Path Visualization".to_string(),
            x_axis: "X Position".to_string(),
            y_axis: "Y Position".to_string(),
        }
    }
}

/// What a draw item depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Background grid.
    Grid,
    /// Faint full-path trace.
    ReferenceTrace,
    /// Bright partial trace `0..f`.
    RevealedTrace,
    /// Marker at point `f - 1`.
    CurrentPosition,
    /// Marker at the first point.
    Start,
    /// Marker at the last point.
    End,
    /// Plot title.
    Title,
    /// Axis name.
    AxisLabel,
    /// Grid value next to an axis.
    TickLabel,
}

/// Marker glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled disc.
    Circle,
    /// Upward triangle.
    Triangle,
    /// Five-pointed star.
    Star,
}

/// Backend-agnostic draw operation in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Open polyline stroke.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke width in pixels.
        width: f64,
        /// Stroke colour.
        color: Rgba8,
    },
    /// Filled marker glyph.
    Marker {
        /// Glyph centre.
        center: Point,
        /// Glyph shape.
        shape: MarkerShape,
        /// Circumradius in pixels.
        radius: f64,
        /// Fill colour.
        color: Rgba8,
    },
    /// Single line of text.
    Text {
        /// Content.
        text: String,
        /// Anchor point; the line is vertically centred on it.
        anchor: Point,
        /// Horizontal placement relative to `anchor`.
        align: TextAlign,
        /// Font size in pixels.
        size: f64,
        /// Rotation about `anchor` in radians, clockwise in pixel space.
        angle: f64,
        /// Fill colour.
        color: Rgba8,
    },
}

/// Horizontal text alignment relative to the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    Center,
    /// Text ends at the anchor.
    End,
}

/// A draw op tagged with what it depicts.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Depicted element.
    pub role: Role,
    /// Pixel-space op.
    pub op: DrawOp,
}

/// Everything needed to rasterize one frame, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Frame this plan depicts.
    pub frame: FrameIndex,
    /// Target surface.
    pub canvas: Canvas,
    /// Clear colour.
    pub background: Rgba8,
    /// Draw items, back to front.
    pub items: Vec<DrawItem>,
}

impl FramePlan {
    /// Items with the given role.
    pub fn items_with(&self, role: Role) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.role == role)
    }

    /// `true` when at least one item has `role`.
    pub fn has(&self, role: Role) -> bool {
        self.items_with(role).next().is_some()
    }
}

const GRID_TARGET_TICKS: usize = 6;
const GRID_LINE_WIDTH: f64 = 1.0;
const TEXT_GAP: f64 = 6.0;
// Rough advance of one glyph as a fraction of the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Compile frame `frame` of `dataset`.
///
/// The grid, annotations, reference trace and start/end markers are frame-independent. For
/// `frame > 0` the revealed trace covers points `0..frame` and the current-position marker
/// sits on point `frame - 1`.
pub fn compile_frame(
    dataset: &PathDataset,
    layout: &PlotLayout,
    palette: &Palette,
    labels: &PlotLabels,
    frame: FrameIndex,
) -> TrajviewResult<FramePlan> {
    let points = dataset.points();
    let (Some(start), Some(end)) = (dataset.first(), dataset.last()) else {
        return Err(TrajviewError::validation(
            "cannot compile a frame for an empty trajectory",
        ));
    };
    let f = frame.revealed();
    if f > points.len() {
        return Err(TrajviewError::validation(format!(
            "frame {} is past the final frame {}",
            frame.0,
            points.len()
        )));
    }

    let px = |p: Point| layout.to_pixel(p);
    let mut items = axis_items(layout, palette, labels);

    items.push(DrawItem {
        role: Role::ReferenceTrace,
        op: DrawOp::Polyline {
            points: points.iter().copied().map(px).collect(),
            width: palette.reference_width,
            color: palette.reference_trace,
        },
    });

    if f > 0 {
        items.push(DrawItem {
            role: Role::RevealedTrace,
            op: DrawOp::Polyline {
                points: points[..f].iter().copied().map(px).collect(),
                width: palette.revealed_width,
                color: palette.revealed_trace,
            },
        });
        items.push(marker(
            Role::CurrentPosition,
            px(points[f - 1]),
            MarkerShape::Circle,
            palette.current,
            palette.marker_radius,
        ));
    }

    items.push(marker(
        Role::Start,
        px(start),
        MarkerShape::Triangle,
        palette.start,
        palette.marker_radius,
    ));
    items.push(marker(
        Role::End,
        px(end),
        MarkerShape::Star,
        palette.end,
        palette.marker_radius * 1.2,
    ));

    Ok(FramePlan {
        frame,
        canvas: layout.canvas(),
        background: palette.background,
        items,
    })
}

fn marker(role: Role, center: Point, shape: MarkerShape, color: Rgba8, radius: f64) -> DrawItem {
    DrawItem {
        role,
        op: DrawOp::Marker {
            center,
            shape,
            radius,
            color,
        },
    }
}

fn text(
    role: Role,
    content: String,
    anchor: Point,
    align: TextAlign,
    size: f64,
    color: Rgba8,
) -> DrawItem {
    DrawItem {
        role,
        op: DrawOp::Text {
            text: content,
            anchor,
            align,
            size,
            angle: 0.0,
            color,
        },
    }
}

/// Grid lines with their tick values, then the axis labels and the title.
fn axis_items(layout: &PlotLayout, palette: &Palette, labels: &PlotLabels) -> Vec<DrawItem> {
    let vp = layout.viewport();
    let Rect { x0, y0, x1, y1 } = layout.plot_rect();
    let line = |a: Point, b: Point| DrawItem {
        role: Role::Grid,
        op: DrawOp::Polyline {
            points: vec![a, b],
            width: GRID_LINE_WIDTH,
            color: palette.grid,
        },
    };
    let tick_size = palette.tick_label_size;
    let mut items = Vec::new();

    let x_ticks = grid_ticks(vp.x_min, vp.x_max, GRID_TARGET_TICKS);
    for &x in &x_ticks.values {
        let px = layout.to_pixel(Point::new(x, vp.y_min)).x;
        items.push(line(Point::new(px, y0), Point::new(px, y1)));
        items.push(text(
            Role::TickLabel,
            format_tick(x, &x_ticks),
            Point::new(px, y1 + TEXT_GAP + tick_size / 2.0),
            TextAlign::Center,
            tick_size,
            palette.text,
        ));
    }

    let y_ticks = grid_ticks(vp.y_min, vp.y_max, GRID_TARGET_TICKS);
    let mut widest = 0usize;
    for &y in &y_ticks.values {
        let py = layout.to_pixel(Point::new(vp.x_min, y)).y;
        items.push(line(Point::new(x0, py), Point::new(x1, py)));
        let label = format_tick(y, &y_ticks);
        widest = widest.max(label.chars().count());
        items.push(text(
            Role::TickLabel,
            label,
            Point::new(x0 - TEXT_GAP, py),
            TextAlign::End,
            tick_size,
            palette.text,
        ));
    }

    let mid_x = (x0 + x1) / 2.0;
    let axis_size = palette.axis_label_size;
    if !labels.x_axis.is_empty() {
        items.push(text(
            Role::AxisLabel,
            labels.x_axis.clone(),
            Point::new(mid_x, y1 + 2.0 * TEXT_GAP + tick_size + axis_size / 2.0),
            TextAlign::Center,
            axis_size,
            palette.text,
        ));
    }
    if !labels.y_axis.is_empty() {
        let tick_width = widest as f64 * GLYPH_ASPECT * tick_size;
        items.push(DrawItem {
            role: Role::AxisLabel,
            op: DrawOp::Text {
                text: labels.y_axis.clone(),
                anchor: Point::new(
                    x0 - 2.0 * TEXT_GAP - tick_width - axis_size / 2.0,
                    (y0 + y1) / 2.0,
                ),
                align: TextAlign::Center,
                size: axis_size,
                angle: -std::f64::consts::FRAC_PI_2,
                color: palette.text,
            },
        });
    }
    if !labels.title.is_empty() {
        items.push(text(
            Role::Title,
            labels.title.clone(),
            Point::new(mid_x, y0 - 2.0 * TEXT_GAP - palette.title_size / 2.0),
            TextAlign::Center,
            palette.title_size,
            palette.text,
        ));
    }
    items
}

/// Format a tick value with as many decimals as its step needs.
pub(crate) fn format_tick(value: f64, ticks: &Ticks) -> String {
    let decimals = if ticks.step > 0.0 && ticks.step < 1.0 {
        (-ticks.step.log10().floor()) as usize
    } else {
        0
    };
    let s = format!("{value:.decimals$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
