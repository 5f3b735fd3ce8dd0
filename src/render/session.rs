use std::path::PathBuf;
use std::time::Duration;

use crate::animation::state::{AnimationState, Playback};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::path::dataset::PathDataset;
use crate::render::cpu::CpuRasterizer;
use crate::render::frame::FrameRGBA;
use crate::render::plan::{FramePlan, Palette, PlotLabels, compile_frame};
use crate::render::text::{FontSource, load_font};
use crate::render::viewport::{PlotLayout, Viewport};

/// Well-known location of the headless animation artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "/app/animation.gif";

/// Default delay between animation ticks.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(150);

const ENV_FRAME_INTERVAL_MS: &str = "TRAJVIEW_FRAME_INTERVAL_MS";
const ENV_ARTIFACT_PATH: &str = "TRAJVIEW_ARTIFACT_PATH";
const ENV_FONT: &str = "TRAJVIEW_FONT";

/// Options controlling how a trajectory is animated.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    /// Output size for exported frames and the initial window size.
    pub canvas: Canvas,
    /// Delay between frame advances.
    pub frame_interval: Duration,
    /// Where headless mode writes the animated artifact.
    pub artifact_path: PathBuf,
    /// Colours and stroke sizes.
    pub palette: Palette,
    /// Title and axis labels.
    pub labels: PlotLabels,
    /// Font used for annotations.
    pub font: FontSource,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            palette: Palette::default(),
            labels: PlotLabels::default(),
            font: FontSource::default(),
        }
    }
}

impl RenderOpts {
    /// Defaults overlaid with `TRAJVIEW_FRAME_INTERVAL_MS`, `TRAJVIEW_ARTIFACT_PATH` and
    /// `TRAJVIEW_FONT` (`auto`, `none` or a font file).
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(raw) = std::env::var(ENV_FRAME_INTERVAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => opts.frame_interval = Duration::from_millis(ms),
                _ => tracing::warn!(var = ENV_FRAME_INTERVAL_MS, value = %raw, "ignoring invalid value"),
            }
        }
        if let Some(path) = std::env::var_os(ENV_ARTIFACT_PATH).filter(|p| !p.is_empty()) {
            opts.artifact_path = PathBuf::from(path);
        }
        if let Ok(raw) = std::env::var(ENV_FONT) {
            opts.font = FontSource::parse(&raw);
        }
        opts
    }

    /// Return options with a different frame interval.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Return options with a different artifact path.
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Return options with a different annotation font.
    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }

    /// Return options with a different canvas.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Check option invariants.
    pub fn validate(&self) -> TrajviewResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.frame_interval.is_zero() {
            return Err(TrajviewError::validation("frame interval must be non-zero"));
        }
        Ok(())
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
}

/// Animated path renderer for one non-empty trajectory.
///
/// Owns the dataset, the fixed viewport and the rasterizer for the duration of one
/// visualization run; everything is released when the session is dropped.
pub struct RenderSession {
    dataset: PathDataset,
    viewport: Viewport,
    opts: RenderOpts,
    raster: CpuRasterizer,
}

impl RenderSession {
    /// Create a session. Fails on an empty dataset, invalid options or an unreadable font file.
    pub fn new(dataset: PathDataset, opts: RenderOpts) -> TrajviewResult<Self> {
        opts.validate()?;
        let viewport = Viewport::from_dataset(&dataset)
            .ok_or_else(|| TrajviewError::validation("render session needs at least one point"))?;
        let raster = match load_font(&opts.font)? {
            Some(bytes) => CpuRasterizer::with_font(bytes)?,
            None => CpuRasterizer::new(),
        };
        tracing::debug!(annotations = raster.has_font(), "render session ready");
        Ok(Self {
            dataset,
            viewport,
            opts,
            raster,
        })
    }

    /// Trajectory being animated.
    pub fn dataset(&self) -> &PathDataset {
        &self.dataset
    }

    /// Viewport shared by every frame.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Session options.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Fresh animation cursor for this trajectory.
    pub fn animation(&self, playback: Playback) -> AnimationState {
        AnimationState::new(self.dataset.len(), playback)
    }

    /// Final frame index (`N`).
    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.dataset.len() as u64)
    }

    /// Draw plan for `frame` on `canvas`.
    pub fn plan_frame(&self, frame: FrameIndex, canvas: Canvas) -> TrajviewResult<FramePlan> {
        let layout = PlotLayout::new(self.viewport, canvas);
        compile_frame(
            &self.dataset,
            &layout,
            &self.opts.palette,
            &self.opts.labels,
            frame,
        )
    }

    /// Rasterize `frame` at the configured canvas size.
    pub fn render_frame(&mut self, frame: FrameIndex) -> TrajviewResult<FrameRGBA> {
        self.render_frame_sized(frame, self.opts.canvas)
    }

    /// Rasterize `frame` at an explicit size (used when a window is resized).
    pub fn render_frame_sized(
        &mut self,
        frame: FrameIndex,
        canvas: Canvas,
    ) -> TrajviewResult<FrameRGBA> {
        let plan = self.plan_frame(frame, canvas)?;
        self.raster.render(&plan)
    }

    /// Static variant: only the final, fully revealed frame.
    pub fn render_still(&mut self) -> TrajviewResult<FrameRGBA> {
        self.render_frame(self.last_frame())
    }

    /// Render exactly one pass, frames `0..=N`, into `sink`.
    #[tracing::instrument(skip(self, sink), fields(points = self.dataset.len()))]
    pub fn render_pass(&mut self, sink: &mut dyn FrameSink) -> TrajviewResult<RenderStats> {
        sink.begin(SinkConfig {
            width: self.opts.canvas.width,
            height: self.opts.canvas.height,
            frame_interval: self.opts.frame_interval,
            background: self.opts.palette.background,
        })?;

        let mut state = self.animation(Playback::Once);
        let mut stats = RenderStats::default();
        loop {
            let idx = state.current();
            let frame = self.render_frame(idx)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
            tracing::debug!(frame = idx.0, "frame rendered");
            if !state.advance() {
                break;
            }
        }

        sink.end()?;
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
