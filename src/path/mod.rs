//! Trajectory data: the ordered point sequence and the point-stream text parser.

/// Ordered trajectory container.
pub mod dataset;
/// Tolerant point-stream parser.
pub mod parse;
