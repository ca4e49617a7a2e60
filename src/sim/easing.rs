//! Velocity profiles for the spin phases
//!
//! Each curve maps normalized phase progress `p` in `[0, 1]` to normalized
//! displacement in `[0, 1]`. Acceleration is always a sinusoidal ease-in of
//! velocity; deceleration uses the configured curve and ends at zero velocity.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Deceleration curve choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Velocity follows cos(p·π/2): long, gentle coast
    #[default]
    Sine,
    /// Velocity falls off as (1 - p)²: brakes harder early
    Cubic,
    /// Velocity falls off as (1 - p)⁴: quick stop, long crawl
    Quintic,
}

impl Easing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Sine => "Sine",
            Easing::Cubic => "Cubic",
            Easing::Quintic => "Quintic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sine" | "cos" => Some(Easing::Sine),
            "cubic" => Some(Easing::Cubic),
            "quintic" => Some(Easing::Quintic),
            _ => None,
        }
    }

    /// Normalized displacement of the deceleration phase
    pub fn ease_out(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Sine => (p * FRAC_PI_2).sin(),
            Easing::Cubic => 1.0 - (1.0 - p).powi(3),
            Easing::Quintic => 1.0 - (1.0 - p).powi(5),
        }
    }

    /// Slope of `ease_out` at p = 0, used to match the cruise velocity
    pub fn initial_slope(&self) -> f64 {
        match self {
            Easing::Sine => FRAC_PI_2,
            Easing::Cubic => 3.0,
            Easing::Quintic => 5.0,
        }
    }
}

/// Normalized displacement of the acceleration phase (velocity = sin(p·π/2))
pub fn ease_in_sine(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (p * FRAC_PI_2).cos()
}

/// Displacement of a full acceleration phase per unit of cruise velocity and duration
pub const EASE_IN_AREA: f64 = 2.0 / std::f64::consts::PI;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in [Easing::Sine, Easing::Cubic, Easing::Quintic] {
            assert_eq!(easing.ease_out(0.0), 0.0);
            assert!((easing.ease_out(1.0) - 1.0).abs() < 1e-12);
            // Progress is clamped
            assert!((easing.ease_out(3.0) - 1.0).abs() < 1e-12);
            assert_eq!(easing.ease_out(-1.0), 0.0);
        }
        assert_eq!(ease_in_sine(0.0), 0.0);
        assert!((ease_in_sine(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in [Easing::Sine, Easing::Cubic, Easing::Quintic] {
            let mut last = 0.0;
            for step in 1..=100 {
                let v = easing.ease_out(step as f64 / 100.0);
                assert!(v >= last, "{} not monotonic", easing.as_str());
                last = v;
            }
        }
    }

    #[test]
    fn test_initial_slope_matches_curve() {
        let h = 1e-6;
        for easing in [Easing::Sine, Easing::Cubic, Easing::Quintic] {
            let numeric = easing.ease_out(h) / h;
            assert!((numeric - easing.initial_slope()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Easing::from_str("SINE"), Some(Easing::Sine));
        assert_eq!(Easing::from_str("cubic"), Some(Easing::Cubic));
        assert_eq!(Easing::from_str("bounce"), None);
    }
}
