//! Seedable random source for flowline seeding and color selection.
//!
//! Xorshift64 keeps every scene reproducible: the same seed picks the same
//! seed points and the same palette entries on every platform, because the
//! core algorithm is pure integer arithmetic.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is swapped for a fixed non-zero fallback, since 0 is a fixed
/// point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in [0, max). Returns 0 when `max` is 0.
    pub fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() as usize) % max
    }

    /// Picks one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Golden value for xorshift64(seed=42, shifts=13,7,17). Scene files
        // that pin a seed depend on this sequence.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_stick_at_zero() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_index_zero_max_is_zero() {
        let mut rng = Xorshift64::new(1);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = Xorshift64::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn choose_eventually_visits_every_item() {
        let mut rng = Xorshift64::new(2024);
        let items = ["a", "b", "c", "d", "e"];
        let mut seen = [false; 5];
        for _ in 0..500 {
            let pick = rng.choose(&items).unwrap();
            let idx = items.iter().position(|i| i == pick).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "some palette entry never chosen");
    }

    #[test]
    fn state_survives_json_round_trip() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..20 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_index_below_max(seed: u64, max in 1_usize..10_000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_index(max) < max);
                }
            }
        }
    }
}
