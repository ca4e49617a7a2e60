//! Deterministic wheel model
//!
//! Everything that decides *what* the wheel does lives here:
//! - Segment geometry and angle/index mapping
//! - Spin trajectories advanced by caller-supplied time deltas
//! - The Idle/Spinning/Landed outcome machine and countdown
//! - Participant bookkeeping
//!
//! No rendering, DOM or wall-clock dependencies. Randomness is injected
//! through [`TargetPicker`] so tests can seed it.

pub mod easing;
pub mod error;
pub mod geometry;
pub mod picker;
pub mod roster;
pub mod scheduler;
pub mod selection;
pub mod session;

pub use easing::{EASE_IN_AREA, Easing, ease_in_sine};
pub use error::WheelError;
pub use geometry::{Segment, angle_for_index, index_at_angle, segment_width, segments};
pub use picker::TargetPicker;
pub use roster::{
    EXAMPLE_NAMES, Participant, ParticipantId, ResultEntry, Roster, RosterView, parse_names,
};
pub use scheduler::{SpinEvent, SpinHandle, SpinOptions, SpinScheduler, SpinTrajectory, TickOutput};
pub use selection::{
    CountdownToken, Outcome, OutcomeStatus, Phase, ResolveCause, SelectionMachine, WheelEvent,
};
pub use session::{FrameOutput, Session};
