//! Interactive display surfaces.

/// Looping animation window (`winit` + `softbuffer`).
#[cfg(feature = "window")]
pub mod window;
