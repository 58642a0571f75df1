//! Card value generation
//!
//! Seeded PCG so a board can be replayed from its seed in tests.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MAX_CARDS;
use crate::error::ConfigError;

/// Random source for card values and deals
#[derive(Debug, Clone)]
pub struct NumberGenerator {
    seed: u64,
    rng: Pcg32,
}

impl NumberGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `count` values drawn independently from `[min, max]`
    ///
    /// `count` is clamped to `MAX_CARDS`; duplicates are allowed.
    pub fn generate(&mut self, count: usize, min: u32, max: u32) -> Result<Vec<u32>, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        let count = count.min(MAX_CARDS);
        Ok((0..count).map(|_| self.rng.random_range(min..=max)).collect())
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut rng = NumberGenerator::new(1);
        assert_eq!(
            rng.generate(3, 10, 2),
            Err(ConfigError::InvertedRange { min: 10, max: 2 })
        );
    }

    #[test]
    fn test_count_is_clamped() {
        let mut rng = NumberGenerator::new(7);
        assert_eq!(rng.generate(50, 0, 100).unwrap().len(), MAX_CARDS);
        assert!(rng.generate(0, 0, 100).unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = NumberGenerator::new(7);
        assert_eq!(rng.generate(4, 42, 42).unwrap(), vec![42; 4]);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = NumberGenerator::new(99);
        let mut items = vec![1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    proptest! {
        #[test]
        fn generated_values_stay_in_range(
            seed in any::<u64>(),
            count in 0usize..=MAX_CARDS,
            lo in 0u32..1000,
            span in 0u32..1000,
        ) {
            let hi = lo + span;
            let values = NumberGenerator::new(seed).generate(count, lo, hi).unwrap();
            prop_assert_eq!(values.len(), count);
            prop_assert!(values.iter().all(|v| (lo..=hi).contains(v)));
        }
    }
}
