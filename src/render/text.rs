use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use vello_cpu::kurbo::Affine;

use crate::foundation::core::Point;
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::render::plan::TextAlign;

/// Well-known system font files tried by [`FontSource::Auto`], in order.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Where annotation glyphs come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// First readable entry of [`SYSTEM_FONT_CANDIDATES`]; annotations are skipped when none is.
    #[default]
    Auto,
    /// A specific TTF/OTF file. Failing to read it is an error.
    File(PathBuf),
    /// Never draw text.
    Disabled,
}

impl FontSource {
    /// Parse a CLI or environment value: `auto`, `none`, or a font file path.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "auto" | "" => Self::Auto,
            "none" => Self::Disabled,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

/// Read the font bytes selected by `source`.
///
/// `Ok(None)` means text is not drawn.
pub fn load_font(source: &FontSource) -> TrajviewResult<Option<Vec<u8>>> {
    match source {
        FontSource::Disabled => Ok(None),
        FontSource::File(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read font '{}'", path.display()))?;
            Ok(Some(bytes))
        }
        FontSource::Auto => {
            let found = SYSTEM_FONT_CANDIDATES
                .iter()
                .map(|p| Path::new(*p))
                .find_map(|p| std::fs::read(p).ok().map(|bytes| (p, bytes)));
            match found {
                Some((path, bytes)) => {
                    tracing::debug!(path = %path.display(), "using system font");
                    Ok(Some(bytes))
                }
                None => {
                    tracing::warn!("no system font found; plot annotations are skipped");
                    Ok(None)
                }
            }
        }
    }
}

/// Shapes single-line labels with Parley and draws them as `vello_cpu` glyph runs.
pub(crate) struct TextEngine {
    font: vello_cpu::peniko::FontData,
    family: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    layouts: HashMap<(String, u32), Arc<parley::Layout<()>>>,
}

impl TextEngine {
    pub(crate) fn new(font_bytes: Vec<u8>) -> TrajviewResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TrajviewError::render("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TrajviewError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
            family,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            layouts: HashMap::new(),
        })
    }

    fn layout(&mut self, text: &str, size: f32) -> Arc<parley::Layout<()>> {
        let key = (text.to_string(), size.to_bits());
        if let Some(layout) = self.layouts.get(&key) {
            return layout.clone();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let layout = Arc::new(layout);
        self.layouts.insert(key, layout.clone());
        layout
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        align: TextAlign,
        size: f64,
        angle: f64,
        color: vello_cpu::peniko::Color,
    ) {
        if text.is_empty() || !size.is_finite() || size <= 0.0 {
            return;
        }
        let layout = self.layout(text, size as f32);
        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        let dx = match align {
            TextAlign::Start => 0.0,
            TextAlign::Center => width / 2.0,
            TextAlign::End => width,
        };

        ctx.set_transform(
            Affine::translate((anchor.x, anchor.y))
                * Affine::rotate(angle)
                * Affine::translate((-dx, -height / 2.0)),
        );
        ctx.set_paint(color);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(Affine::IDENTITY);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
