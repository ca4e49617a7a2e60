//! Frame-driven spin scheduler
//!
//! Advances only when the host calls [`SpinScheduler::tick`] (once per
//! displayed frame). A spin is planned up front as a closed-form trajectory,
//! so every frame angle is a pure function of elapsed time and the final
//! frame snaps to the exact target orientation.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::easing::{EASE_IN_AREA, Easing, ease_in_sine};
use super::error::WheelError;
use super::geometry::angle_for_index;
use crate::consts::*;
use crate::normalize_angle;

/// Shortest deceleration the scheduler will plan (ms)
const MIN_DECEL_MS: f64 = 1.0;

/// Per-spin tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOptions {
    /// Total spin time including acceleration (ms)
    pub duration_ms: f64,
    /// Full turns added on top of the shortest travel to the target
    pub extra_rotations: u32,
    /// Deceleration curve
    pub easing: Easing,
    /// Acceleration phase length (ms)
    pub accel_ms: f64,
    /// Stopping point within the target segment, see [`angle_for_index`]
    pub jitter: f64,
}

impl Default for SpinOptions {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            extra_rotations: EXTRA_ROTATIONS,
            easing: Easing::Sine,
            accel_ms: ACCEL_DURATION_MS,
            jitter: 0.5,
        }
    }
}

impl SpinOptions {
    /// Acceleration and deceleration lengths with garbage inputs replaced
    fn phase_durations(&self) -> (f64, f64) {
        let accel = if self.accel_ms.is_finite() {
            self.accel_ms.max(0.0)
        } else {
            ACCEL_DURATION_MS
        };
        let total = if self.duration_ms.is_finite() {
            self.duration_ms
        } else {
            SPIN_DURATION_MS
        };
        (accel, (total - accel).max(MIN_DECEL_MS))
    }
}

/// Returned by a successful `start_spin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinHandle {
    pub id: u64,
    pub target_index: usize,
    /// Orientation the wheel will rest at
    pub final_angle: f64,
    pub duration_ms: f64,
}

/// Planned motion of one spin. Owned by the scheduler until it lands or is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinTrajectory {
    pub spin_id: u64,
    /// Scheduler clock at start (ms)
    pub start_time_ms: f64,
    pub target_index: usize,
    pub segment_count: usize,
    pub start_angle: f64,
    pub final_angle: f64,
    /// Total unwrapped rotation from start to rest (radians)
    pub travel: f64,
    /// Cruise velocity reached at the end of acceleration (radians/ms)
    pub max_angular_speed: f64,
    pub accel_duration_ms: f64,
    pub decel_duration_ms: f64,
    pub easing: Easing,
}

impl SpinTrajectory {
    fn plan(
        spin_id: u64,
        start_time_ms: f64,
        start_angle: f64,
        target_index: usize,
        segment_count: usize,
        options: &SpinOptions,
    ) -> Result<Self, WheelError> {
        let final_angle = angle_for_index(target_index, segment_count, options.jitter)?;
        let (accel, decel) = options.phase_durations();
        let travel = normalize_angle(final_angle - start_angle)
            + options.extra_rotations as f64 * TAU;

        // Distance covered per unit of cruise velocity over both phases
        let reach = accel * EASE_IN_AREA + decel / options.easing.initial_slope();
        let max_angular_speed = travel / reach;

        Ok(Self {
            spin_id,
            start_time_ms,
            target_index,
            segment_count,
            start_angle,
            final_angle,
            travel,
            max_angular_speed,
            accel_duration_ms: accel,
            decel_duration_ms: decel,
            easing: options.easing,
        })
    }

    pub fn duration_ms(&self) -> f64 {
        self.accel_duration_ms + self.decel_duration_ms
    }

    /// Unwrapped rotation after `elapsed_ms`, clamped to the full travel
    pub fn travel_at(&self, elapsed_ms: f64) -> f64 {
        let accel = self.accel_duration_ms;
        let accel_travel = self.max_angular_speed * accel * EASE_IN_AREA;

        if elapsed_ms < accel {
            return accel_travel * ease_in_sine(elapsed_ms / accel);
        }

        let progress = (elapsed_ms - accel) / self.decel_duration_ms;
        if progress >= 1.0 {
            return self.travel;
        }
        let decel_reach = self.max_angular_speed * self.decel_duration_ms
            / self.easing.initial_slope();
        accel_travel + decel_reach * self.easing.ease_out(progress)
    }

    /// Wheel orientation after `elapsed_ms`
    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        normalize_angle(self.start_angle + self.travel_at(elapsed_ms))
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms()
    }
}

/// Emitted by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEvent {
    /// The spin resolved; emitted exactly once per uncancelled spin
    Landed { spin_id: u64, index: usize },
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Current wheel orientation in [0, 2π)
    pub angle: f64,
    pub event: Option<SpinEvent>,
}

/// Owns the wheel's rotation angle. Only `tick` moves it while a spin is active.
#[derive(Debug, Clone)]
pub struct SpinScheduler {
    angle: f64,
    clock_ms: f64,
    trajectory: Option<SpinTrajectory>,
    next_spin_id: u64,
}

impl Default for SpinScheduler {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SpinScheduler {
    pub fn new(angle: f64) -> Self {
        Self {
            angle: normalize_angle(angle),
            clock_ms: 0.0,
            trajectory: None,
            next_spin_id: 1,
        }
    }

    /// Current wheel orientation in [0, 2π)
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Monotonic scheduler clock (ms)
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn is_spinning(&self) -> bool {
        self.trajectory.is_some()
    }

    pub fn trajectory(&self) -> Option<&SpinTrajectory> {
        self.trajectory.as_ref()
    }

    /// Reposition the resting wheel (e.g. after the face is rebuilt)
    pub fn set_resting_angle(&mut self, angle: f64) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        self.angle = normalize_angle(angle);
        Ok(())
    }

    /// Plan a spin from the current angle toward `target_index`
    pub fn start_spin(
        &mut self,
        target_index: usize,
        segment_count: usize,
        options: &SpinOptions,
    ) -> Result<SpinHandle, WheelError> {
        if self.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }

        let trajectory = SpinTrajectory::plan(
            self.next_spin_id,
            self.clock_ms,
            self.angle,
            target_index,
            segment_count,
            options,
        )?;
        self.next_spin_id += 1;

        let handle = SpinHandle {
            id: trajectory.spin_id,
            target_index,
            final_angle: trajectory.final_angle,
            duration_ms: trajectory.duration_ms(),
        };
        log::debug!(
            "Spin {} planned: target {} of {}, {:.2} rad over {:.0} ms",
            handle.id,
            target_index,
            segment_count,
            trajectory.travel,
            handle.duration_ms
        );
        self.trajectory = Some(trajectory);
        Ok(handle)
    }

    /// Advance the clock by `delta_ms` and publish the new angle
    ///
    /// Negative or non-finite deltas count as zero so time never runs backward.
    pub fn tick(&mut self, delta_ms: f64) -> TickOutput {
        let delta = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        self.clock_ms += delta;

        let Some(trajectory) = &self.trajectory else {
            return TickOutput {
                angle: self.angle,
                event: None,
            };
        };

        let elapsed = self.clock_ms - trajectory.start_time_ms;
        if trajectory.is_complete(elapsed) {
            // Snap to the planned orientation instead of the integrated value
            self.angle = trajectory.final_angle;
            let event = SpinEvent::Landed {
                spin_id: trajectory.spin_id,
                index: trajectory.target_index,
            };
            self.trajectory = None;
            return TickOutput {
                angle: self.angle,
                event: Some(event),
            };
        }

        self.angle = trajectory.angle_at(elapsed);
        TickOutput {
            angle: self.angle,
            event: None,
        }
    }

    /// Drop the active trajectory without landing. Returns whether a spin was active.
    pub fn cancel_spin(&mut self) -> bool {
        match self.trajectory.take() {
            Some(trajectory) => {
                log::debug!("Spin {} cancelled", trajectory.spin_id);
                true
            }
            None => false,
        }
    }
}
