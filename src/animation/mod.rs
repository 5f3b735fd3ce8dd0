//! Frame-advance state machine.

/// Animation cursor and playback policy.
pub mod state;
