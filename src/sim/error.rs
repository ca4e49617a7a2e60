//! Errors surfaced to the host

use thiserror::Error;

use super::selection::Phase;

/// Reasons a wheel operation is refused. None of these leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    /// The wheel has no participants
    #[error("the wheel has no participants")]
    InvalidWheelState,
    /// A spin is already in progress
    #[error("a spin is already in progress")]
    AlreadySpinning,
    /// Target index is outside the current participant range
    #[error("target index {index} is out of range for {count} participants")]
    InvalidTarget { index: usize, count: usize },
    /// An outcome is pending; the request must wait until the wheel is idle again
    #[error("the wheel is busy ({phase:?})")]
    NotIdle { phase: Phase },
}
