// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Generates values from proptest strategies deterministically, given a seed.
#[derive(Debug)]
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose RNG is derived from the hash of `seed`.
    pub fn from_seed(seed: impl Hash) -> Self {
        // ChaCha takes a 32-byte seed: hash four times with different hasher seeds.
        let mut seed_bytes = [0_u8; 32];
        for (ix, chunk) in seed_bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(ix as u64);
            seed.hash(&mut hasher);
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed_bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Forks off a generator with an RNG derived from this one.
    ///
    /// Each fork consumes a fixed amount of randomness from `self`, so the values a fork
    /// generates don't shift when earlier forks generate more or fewer values.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("creating a new value should succeed")
            .current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_values() {
        let mut a = ValueGenerator::from_seed("seed");
        let mut b = ValueGenerator::from_seed("seed");
        for _ in 0..8 {
            let strategy = prop::collection::vec(any::<u64>(), 4);
            assert_eq!(a.generate(strategy.clone()), b.generate(strategy));
        }
    }
}
