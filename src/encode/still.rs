use std::path::Path;

use anyhow::Context as _;

use crate::encode::ensure_parent_dir;
use crate::foundation::core::Rgba8;
use crate::foundation::error::TrajviewResult;
use crate::render::frame::FrameRGBA;

/// Write `frame` as an opaque PNG, flattening over `background`.
pub fn write_png(frame: &FrameRGBA, path: &Path, background: Rgba8) -> TrajviewResult<()> {
    ensure_parent_dir(path)?;
    let rgba = frame.to_opaque_rgba8([background.r, background.g, background.b]);
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
