use crate::foundation::math::flatten_premul_over_bg;

/// A rendered frame as premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, premultiplied alpha.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Opaque straight-alpha RGBA8 copy, flattened over `bg_rgb`.
    pub fn to_opaque_rgba8(&self, bg_rgb: [u8; 3]) -> Vec<u8> {
        let mut out = vec![0u8; self.data.len()];
        flatten_premul_over_bg(&mut out, &self.data, bg_rgb);
        out
    }

    /// RGBA8 bytes of pixel `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).and_then(|s| s.try_into().ok())
    }
}
