//! Randomness for target selection and spin variety
//!
//! Prefers an OS-seeded cryptographic generator. If the platform cannot
//! provide entropy the picker silently degrades to a seeded PCG stream;
//! unpredictability is nice to have, not a safety property.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::error::WheelError;

#[derive(Debug, Clone)]
pub enum TargetPicker {
    /// ChaCha seeded from OS entropy
    Secure(StdRng),
    /// Deterministic fallback (also used by tests and replays)
    Seeded(Pcg32),
}

impl TargetPicker {
    /// OS entropy if available, otherwise a PCG stream seeded with `fallback_seed`
    pub fn from_entropy(fallback_seed: u64) -> Self {
        match StdRng::try_from_os_rng() {
            Ok(rng) => TargetPicker::Secure(rng),
            Err(e) => {
                log::warn!("OS randomness unavailable ({e}); using seeded fallback");
                Self::seeded(fallback_seed)
            }
        }
    }

    pub fn seeded(seed: u64) -> Self {
        TargetPicker::Seeded(Pcg32::seed_from_u64(seed))
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, TargetPicker::Secure(_))
    }

    /// Uniform index in `0..count`
    pub fn pick_index(&mut self, count: usize) -> Result<usize, WheelError> {
        if count == 0 {
            return Err(WheelError::InvalidWheelState);
        }
        Ok(self.random_range(0..count))
    }

    /// Uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    /// `base` plus a uniform spread in `0..=spread`, saturating at `u32::MAX`
    pub fn rotations(&mut self, base: u32, spread: u32) -> u32 {
        base.saturating_add(self.random_range(0..=spread))
    }
}

impl RngCore for TargetPicker {
    fn next_u32(&mut self) -> u32 {
        match self {
            TargetPicker::Secure(rng) => rng.next_u32(),
            TargetPicker::Seeded(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            TargetPicker::Secure(rng) => rng.next_u64(),
            TargetPicker::Seeded(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            TargetPicker::Secure(rng) => rng.fill_bytes(dst),
            TargetPicker::Seeded(rng) => rng.fill_bytes(dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_picker_is_deterministic() {
        let mut a = TargetPicker::seeded(42);
        let mut b = TargetPicker::seeded(42);
        for count in 1..50 {
            assert_eq!(a.pick_index(count), b.pick_index(count));
        }
        assert!(!a.is_secure());
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut picker = TargetPicker::seeded(7);
        for count in 1..100 {
            let i = picker.pick_index(count).unwrap();
            assert!(i < count);
        }
        assert_eq!(picker.pick_index(0), Err(WheelError::InvalidWheelState));
    }

    #[test]
    fn test_pick_covers_every_index() {
        let mut picker = TargetPicker::seeded(3);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[picker.pick_index(6).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_unit_and_rotations_ranges() {
        let mut picker = TargetPicker::from_entropy(1);
        for _ in 0..200 {
            let u = picker.unit();
            assert!((0.0..1.0).contains(&u));
            let r = picker.rotations(6, 3);
            assert!((6..=9).contains(&r));
        }
    }

    #[test]
    fn test_rotations_saturate_instead_of_overflowing() {
        let mut picker = TargetPicker::seeded(11);
        for _ in 0..50 {
            assert_eq!(picker.rotations(u32::MAX, 3), u32::MAX);
            let r = picker.rotations(u32::MAX - 1, u32::MAX);
            assert!(r >= u32::MAX - 1);
        }
    }
}
