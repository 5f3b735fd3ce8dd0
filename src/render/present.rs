use std::path::PathBuf;

use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::FrameSink;
use crate::env::detect::RenderMode;
use crate::foundation::error::TrajviewResult;
use crate::path::dataset::PathDataset;
use crate::render::session::{RenderOpts, RenderSession};

/// What a visualization run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The dataset was empty; nothing was drawn.
    NoData,
    /// One pass was streamed into a sink.
    Exported {
        /// Frames in the pass (`N + 1`).
        frames: u64,
        /// Artifact location, when the sink writes a file.
        path: Option<PathBuf>,
    },
    /// A window looped the animation until it was closed.
    Displayed {
        /// Frames drawn before the window closed.
        frames_shown: u64,
    },
}

/// Mode-specific presentation of a [`RenderSession`].
pub trait Presenter {
    /// Mode this presenter implements.
    fn mode(&self) -> RenderMode;
    /// Present the animation. Returns once the pass is exported or the window is closed.
    fn present(&mut self, session: &mut RenderSession) -> TrajviewResult<RenderOutcome>;
}

/// Off-screen presenter: one deterministic pass into a [`FrameSink`].
pub struct HeadlessPresenter {
    sink: Box<dyn FrameSink>,
    artifact: Option<PathBuf>,
}

impl HeadlessPresenter {
    /// Encode the pass as a looping GIF at `path`.
    pub fn gif(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            sink: Box::new(GifSink::new(GifSinkOpts::new(path.clone()))),
            artifact: Some(path),
        }
    }

    /// Stream the pass into an arbitrary sink.
    pub fn with_sink(sink: Box<dyn FrameSink>) -> Self {
        Self {
            sink,
            artifact: None,
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn mode(&self) -> RenderMode {
        RenderMode::Headless
    }

    fn present(&mut self, session: &mut RenderSession) -> TrajviewResult<RenderOutcome> {
        let stats = session.render_pass(self.sink.as_mut())?;
        Ok(RenderOutcome::Exported {
            frames: stats.frames_rendered,
            path: self.artifact.clone(),
        })
    }
}

/// Construct the presentation backend for `mode`.
///
/// This is the second phase of initialization: the mode is decided first, then exactly one
/// backend is built. Headless never opens a display surface; interactive never writes the
/// artifact path.
pub fn create_presenter(
    mode: RenderMode,
    opts: &RenderOpts,
) -> TrajviewResult<Box<dyn Presenter>> {
    match mode {
        RenderMode::Headless => Ok(Box::new(HeadlessPresenter::gif(opts.artifact_path.clone()))),
        RenderMode::Interactive => interactive_presenter(),
    }
}

#[cfg(feature = "window")]
fn interactive_presenter() -> TrajviewResult<Box<dyn Presenter>> {
    Ok(Box::new(crate::display::window::WindowPresenter::new()))
}

#[cfg(not(feature = "window"))]
fn interactive_presenter() -> TrajviewResult<Box<dyn Presenter>> {
    Err(crate::foundation::error::TrajviewError::display(
        "interactive mode requires the `window` feature",
    ))
}

/// Animate `dataset` through `presenter`.
///
/// An empty dataset is a normal outcome: it is reported as [`RenderOutcome::NoData`] and the
/// presenter is never invoked.
pub fn visualize(
    dataset: PathDataset,
    opts: RenderOpts,
    presenter: &mut dyn Presenter,
) -> TrajviewResult<RenderOutcome> {
    if dataset.is_empty() {
        tracing::warn!("no valid points found; nothing to render");
        return Ok(RenderOutcome::NoData);
    }
    let mut session = RenderSession::new(dataset, opts)?;
    tracing::info!(
        mode = %presenter.mode(),
        points = session.dataset().len(),
        "starting animation"
    );
    presenter.present(&mut session)
}

/// Build the presenter for `mode` and animate `dataset`.
pub fn visualize_with_mode(
    dataset: PathDataset,
    mode: RenderMode,
    opts: RenderOpts,
) -> TrajviewResult<RenderOutcome> {
    if dataset.is_empty() {
        tracing::warn!("no valid points found; nothing to render");
        return Ok(RenderOutcome::NoData);
    }
    let mut presenter = create_presenter(mode, &opts)?;
    visualize(dataset, opts, presenter.as_mut())
}

#[cfg(test)]
#[path = "../../tests/unit/render/present.rs"]
mod tests;
