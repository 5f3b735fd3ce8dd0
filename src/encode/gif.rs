use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::render::frame::FrameRGBA;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Loop the animation forever when played back.
    pub repeat: bool,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    /// Looping GIF at `out_path` with a balanced quantizer speed.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            repeat: true,
            speed: 10,
        }
    }
}

/// Sink that encodes every pushed frame into one animated GIF.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
}

impl GifSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            frames_written: 0,
        }
    }

    /// Frames encoded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> TrajviewResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TrajviewError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(TrajviewError::validation(
                "gif sink width/height must fit in 16 bits",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path).with_context(|| {
            format!("failed to create '{}'", self.opts.out_path.display())
        })?;
        let mut encoder =
            GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed.clamp(1, 30));
        if self.opts.repeat {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| TrajviewError::encode(format!("failed to set gif repeat: {e}")))?;
        }

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TrajviewResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TrajviewError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(TrajviewError::encode(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TrajviewError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let bg = cfg.background;
        let rgba = frame.to_opaque_rgba8([bg.r, bg.g, bg.b]);
        let image = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| TrajviewError::validation("frame.data size mismatch with width*height*4"))?;
        let delay = Delay::from_saturating_duration(cfg.frame_interval);

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(TrajviewError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .map_err(|e| TrajviewError::encode(format!("failed to encode gif frame {}: {e}", idx.0)))?;

        self.last_idx = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> TrajviewResult<()> {
        // Dropping the encoder writes the GIF trailer.
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| TrajviewError::encode("gif sink not started"))?;
        drop(encoder);
        self.cfg = None;
        tracing::info!(
            path = %self.opts.out_path.display(),
            frames = self.frames_written,
            "gif written"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
