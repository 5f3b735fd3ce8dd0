//! Host environment inspection.

/// Headless vs interactive classification.
pub mod detect;
