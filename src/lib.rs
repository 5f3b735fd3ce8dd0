//! trajview runs an external trajectory simulator and animates the 2D path it produces.
//!
//! # Pipeline overview
//!
//! 1. **Execute**: discover the simulator under a project root and run it to completion,
//!    timing the run ([`Orchestrator`]).
//! 2. **Parse**: read the point stream it wrote into a [`PathDataset`], skipping malformed lines
//!    ([`parse_point_file`]).
//! 3. **Detect**: classify the host as [`RenderMode::Interactive`] or [`RenderMode::Headless`]
//!    before any drawing surface exists ([`detect_render_mode`]).
//! 4. **Render**: progressively reveal the path frame by frame ([`RenderSession`]), either looping
//!    in a window or exporting one pass as an animated GIF ([`create_presenter`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic frames**: the viewport is fixed from the whole dataset and frame plans are
//!   pure functions of `(dataset, frame, canvas)`.
//! - **Premultiplied RGBA8** from the rasterizer; sinks flatten over the background colour.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame-advance state machine.
pub mod animation;
/// Interactive display surfaces.
pub mod display;
/// Encoding sinks.
pub mod encode;
/// Host environment inspection.
pub mod env;
/// Simulator execution and the end-to-end pipeline.
pub mod orchestrate;
/// Trajectory data and parsing.
pub mod path;
/// Animated path rendering.
pub mod render;

pub use crate::animation::state::{AnimationState, FrameTicker, Playback};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::still::write_png;
pub use crate::env::detect::{HostProbe, RenderMode, detect_render_mode};
pub use crate::foundation::core::{BezPath, Canvas, FrameIndex, Point, Rect, Rgba8};
pub use crate::foundation::error::{TrajviewError, TrajviewResult};
pub use crate::orchestrate::discover::find_executable;
pub use crate::orchestrate::exec::{ExecutionFailure, ExecutionResult, run_process};
pub use crate::orchestrate::pipeline::{
    DEFAULT_EXE_NAME, DEFAULT_POINT_FILE, Orchestrator, ProjectLayout, RenderReport, RunReport,
    render_point_file, run_and_visualize,
};
pub use crate::path::dataset::PathDataset;
pub use crate::path::parse::{
    LineError, ParsedPoints, SkippedLine, parse_line, parse_point_file, parse_points,
};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::plan::{
    DrawItem, DrawOp, FramePlan, MarkerShape, Palette, PlotLabels, Role, TextAlign, compile_frame,
};
pub use crate::render::present::{
    HeadlessPresenter, Presenter, RenderOutcome, create_presenter, visualize, visualize_with_mode,
};
pub use crate::render::session::{
    DEFAULT_ARTIFACT_PATH, DEFAULT_FRAME_INTERVAL, RenderOpts, RenderSession, RenderStats,
};
pub use crate::render::text::{FontSource, SYSTEM_FONT_CANDIDATES, load_font};
pub use crate::render::viewport::{PlotLayout, Viewport};

#[cfg(feature = "window")]
pub use crate::display::window::WindowPresenter;
