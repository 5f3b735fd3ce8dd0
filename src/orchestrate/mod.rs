//! Running the external trajectory simulator and feeding its output to the renderer.

/// Executable discovery under the project root.
pub mod discover;
/// Blocking process execution with wall-clock timing.
pub mod exec;
/// End-to-end run: simulate, parse, detect, render.
pub mod pipeline;
