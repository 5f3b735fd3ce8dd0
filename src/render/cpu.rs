use kurbo::{BezPath, PathEl, Shape as _};

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::render::frame::FrameRGBA;
use crate::render::plan::{DrawOp, FramePlan, MarkerShape};
use crate::render::text::TextEngine;

const CIRCLE_TOLERANCE: f64 = 0.1;
const STAR_INNER_RATIO: f64 = 0.45;

/// CPU rasterizer for [`FramePlan`]s, powered by `vello_cpu`.
///
/// The render context is kept between frames and rebuilt only when the canvas size changes.
/// Text ops are skipped unless the rasterizer was built with a font.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<CachedContext>,
    text: Option<TextEngine>,
}

struct CachedContext {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuRasterizer {
    /// Create a rasterizer with no cached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rasterizer that draws text ops with the given TTF/OTF bytes.
    pub fn with_font(font_bytes: Vec<u8>) -> TrajviewResult<Self> {
        Ok(Self {
            ctx: None,
            text: Some(TextEngine::new(font_bytes)?),
        })
    }

    /// `true` when text ops are drawn.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    /// Rasterize `plan` into a premultiplied RGBA8 frame.
    pub fn render(&mut self, plan: &FramePlan) -> TrajviewResult<FrameRGBA> {
        let (w, h) = canvas_u16(plan.canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(cached) if cached.width == w && cached.height == h => cached.ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(color_to_cpu(plan.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        for item in &plan.items {
            draw_op(&mut ctx, self.text.as_mut(), &item.op);
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(CachedContext {
            width: w,
            height: h,
            ctx,
        });

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn canvas_u16(canvas: Canvas) -> TrajviewResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TrajviewError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TrajviewError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(TrajviewError::render("canvas width/height must be non-zero"));
    }
    Ok((w, h))
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, text: Option<&mut TextEngine>, op: &DrawOp) {
    match op {
        DrawOp::Polyline {
            points,
            width,
            color,
        } => {
            // A single vertex has no extent to stroke.
            if points.len() < 2 {
                return;
            }
            let mut path = BezPath::new();
            path.move_to(points[0]);
            for &p in &points[1..] {
                path.line_to(p);
            }
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(*width)
                    .with_join(vello_cpu::kurbo::Join::Round)
                    .with_caps(vello_cpu::kurbo::Cap::Round),
            );
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_path(&bezpath_to_cpu(&path));
        }
        DrawOp::Marker {
            center,
            shape,
            radius,
            color,
        } => {
            let path = marker_path(*center, *shape, *radius);
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        DrawOp::Text {
            text: content,
            anchor,
            align,
            size,
            angle,
            color,
        } => {
            if let Some(engine) = text {
                engine.draw(
                    ctx,
                    content,
                    *anchor,
                    *align,
                    *size,
                    *angle,
                    color_to_cpu(*color),
                );
            }
        }
    }
}

pub(crate) fn marker_path(center: Point, shape: MarkerShape, radius: f64) -> BezPath {
    match shape {
        MarkerShape::Circle => kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE),
        MarkerShape::Triangle => polygon(center, radius, 3, None),
        MarkerShape::Star => polygon(center, radius, 5, Some(radius * STAR_INNER_RATIO)),
    }
}

/// Regular polygon (or star when `inner` is set) with the first vertex pointing up in pixel
/// space.
fn polygon(center: Point, outer: f64, sides: usize, inner: Option<f64>) -> BezPath {
    let step = std::f64::consts::TAU / sides as f64;
    let vertex = |r: f64, angle: f64| {
        Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    };

    let mut path = BezPath::new();
    for i in 0..sides {
        let angle = -std::f64::consts::FRAC_PI_2 + step * i as f64;
        let p = vertex(outer, angle);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
        if let Some(r) = inner {
            path.line_to(vertex(r, angle + step / 2.0));
        }
    }
    path.close_path();
    path
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
