//! Animated path rendering.
//!
//! Frames flow through three stages:
//!
//! 1. **Layout**: the whole dataset fixes a square [`viewport::Viewport`].
//! 2. **Plan**: `dataset + frame -> FramePlan`, a backend-agnostic list of pixel-space draw ops.
//! 3. **Rasterize**: `FramePlan -> FrameRGBA` on the CPU.
//!
//! A [`present::Presenter`] chosen from the [`crate::RenderMode`] then either streams one pass
//! into a sink (headless) or loops frames in a window (interactive).

/// CPU rasterizer.
pub mod cpu;
/// Rendered frame buffer.
pub mod frame;
/// Per-frame draw plan.
pub mod plan;
/// Mode-specific presentation backends.
pub mod present;
/// Session-oriented renderer.
pub mod session;
/// Annotation fonts and text shaping.
pub mod text;
/// Viewport and world-to-pixel mapping.
pub mod viewport;
