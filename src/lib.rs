//! Prize Wheel - a spinning wheel that picks one participant at a time
//!
//! Core modules:
//! - `sim`: Deterministic wheel model (geometry, spin scheduling, outcome state machine)
//! - `renderer`: Cached wheel face and WebGPU rendering pipeline
//! - `settings`: Persisted spin/countdown preferences
//! - `palette`: Segment and chrome colors

pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{SpinPreset, WheelSettings};
pub use sim::{Session, WheelError};

use glam::Vec2;

/// Wheel configuration constants
pub mod consts {
    /// Acceleration phase duration (ms). Short and fixed; the feel comes from deceleration.
    pub const ACCEL_DURATION_MS: f64 = 250.0;
    /// Default total spin duration including acceleration (ms)
    pub const SPIN_DURATION_MS: f64 = 10_000.0;
    /// Default number of full extra turns before settling
    pub const EXTRA_ROTATIONS: u32 = 8;
    /// Upper bounds applied to stored settings
    pub const MAX_EXTRA_ROTATIONS: u32 = 50;
    pub const MAX_ROTATION_SPREAD: u32 = 20;
    pub const MAX_SPIN_DURATION_MS: f64 = 60_000.0;

    /// Discrete countdown ticks before a landed participant is marked absent
    pub const COUNTDOWN_TICKS: u32 = 10;
    pub const MAX_COUNTDOWN_TICKS: u32 = 600;
    /// Countdown tick period (ms)
    pub const COUNTDOWN_PERIOD_MS: i32 = 1000;

    /// Maximum characters of a name drawn on the wheel or next to the needle
    pub const LABEL_MAX_CHARS: usize = 20;

    /// Share of a segment's width that jitter may land in (centered)
    pub const JITTER_SPAN: f64 = 0.8;

    /// Wheel dimensions in wheel units (face radius is 1.0)
    pub const WHEEL_RADIUS: f32 = 1.0;
    pub const HUB_RADIUS: f32 = 0.08;
    pub const RIM_THICKNESS: f32 = 0.04;
    /// Label distance from center as a fraction of the face radius
    pub const LABEL_RADIUS: f32 = 0.6;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let a = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
