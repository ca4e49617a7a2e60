//! Wheel segment geometry
//!
//! The needle is fixed at angle 0 (pointing right). The wheel is rotated by
//! `angle`; in wheel-local coordinates segment `i` of `n` covers
//! `[i * 2π/n, (i + 1) * 2π/n)`, so on screen it covers that range shifted by
//! `angle`. Angles grow clockwise on screen (canvas convention).

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::error::WheelError;
use crate::consts::JITTER_SPAN;
use crate::normalize_angle;

/// One angular slice of the wheel in wheel-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    /// Inclusive start angle (radians)
    pub theta_start: f64,
    /// Exclusive end angle (radians)
    pub theta_end: f64,
}

impl Segment {
    /// Angular width of the slice
    #[inline]
    pub fn angular_span(&self) -> f64 {
        self.theta_end - self.theta_start
    }

    /// Mid angle, where the label sits
    #[inline]
    pub fn mid_angle(&self) -> f64 {
        self.theta_start + self.angular_span() / 2.0
    }

    /// Check if a wheel-local angle falls inside the half-open slice
    pub fn contains_angle(&self, theta: f64) -> bool {
        let theta = normalize_angle(theta);
        theta >= self.theta_start && theta < self.theta_end
    }
}

/// Width of one segment for `count` participants
#[inline]
pub fn segment_width(count: usize) -> Result<f64, WheelError> {
    if count == 0 {
        return Err(WheelError::InvalidWheelState);
    }
    Ok(TAU / count as f64)
}

/// Partition one full turn into `count` segments
///
/// Boundaries are computed from the index rather than accumulated, and the
/// last segment ends at exactly 2π, so the slices tile `[0, 2π)` without gaps.
pub fn segments(count: usize) -> Result<Vec<Segment>, WheelError> {
    let width = segment_width(count)?;
    Ok((0..count).map(|i| segment_bounds(i, count, width)).collect())
}

fn segment_bounds(index: usize, count: usize, width: f64) -> Segment {
    Segment {
        index,
        theta_start: index as f64 * width,
        theta_end: if index + 1 == count {
            TAU
        } else {
            (index + 1) as f64 * width
        },
    }
}

/// Which segment sits under the needle when the wheel is rotated by `angle`
///
/// A boundary belongs to the segment that starts there.
pub fn index_at_angle(angle: f64, count: usize) -> Result<usize, WheelError> {
    let width = segment_width(count)?;
    let local = normalize_angle(-angle);
    let mut index = ((local / width).floor() as usize).min(count - 1);
    // The division can round across a boundary; settle against the exact bounds
    let seg = segment_bounds(index, count, width);
    if local < seg.theta_start && index > 0 {
        index -= 1;
    } else if local >= seg.theta_end && index + 1 < count {
        index += 1;
    }
    Ok(index)
}

/// Rotation that places segment `index` under the needle
///
/// `jitter` in `[0, 1)` moves the stopping point across the inner
/// `JITTER_SPAN` of the segment; 0.5 is dead center. Out-of-range jitter is
/// clamped and `NaN` means center.
pub fn angle_for_index(index: usize, count: usize, jitter: f64) -> Result<f64, WheelError> {
    let width = segment_width(count)?;
    if index >= count {
        return Err(WheelError::InvalidTarget { index, count });
    }
    let offset = 0.5 + (clamp_jitter(jitter) - 0.5) * JITTER_SPAN;
    let local = (index as f64 + offset) * width;
    Ok(normalize_angle(-local))
}

fn clamp_jitter(jitter: f64) -> f64 {
    if jitter.is_nan() {
        0.5
    } else {
        jitter.clamp(0.0, 1.0)
    }
}
