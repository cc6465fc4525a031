//! Where a message's verification key comes from.
//!
//! A [`crate::Message`] draws exactly one key at construction and keeps it.
//! The reference scheme always uses 5; callers that want something else
//! pass their own [`KeySource`]: a fixed key, a seeded or entropy-backed
//! RNG, or any closure.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::verify::{VerificationKey, KEY_MODULUS};

/// Key used when a message is built without one.
pub const DEFAULT_KEY: VerificationKey = VerificationKey::new(5);

pub trait KeySource {
    fn next_key(&mut self) -> VerificationKey;
}

/// Always returns the same key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedKey(pub VerificationKey);

impl Default for FixedKey {
    fn default() -> Self {
        FixedKey(DEFAULT_KEY)
    }
}

impl KeySource for FixedKey {
    fn next_key(&mut self) -> VerificationKey {
        self.0
    }
}

/// Draws keys uniformly from `[0, 13)`.
#[derive(Clone, Debug)]
pub struct RandomKey<R> {
    rng: R,
}

impl<R: Rng> RandomKey<R> {
    pub fn new(rng: R) -> Self {
        RandomKey { rng }
    }
}

impl RandomKey<StdRng> {
    pub fn from_entropy() -> Self {
        RandomKey::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RandomKey::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> KeySource for RandomKey<R> {
    fn next_key(&mut self) -> VerificationKey {
        VerificationKey::new(self.rng.gen_range(0..KEY_MODULUS))
    }
}

impl<F> KeySource for F
where
    F: FnMut() -> VerificationKey,
{
    fn next_key(&mut self) -> VerificationKey {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_default_is_five() {
        let mut source = FixedKey::default();
        assert_eq!(source.next_key().value(), 5);
        assert_eq!(source.next_key().value(), 5);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = RandomKey::seeded(42);
        let mut b = RandomKey::seeded(42);
        for _ in 0..32 {
            let key = a.next_key();
            assert_eq!(key, b.next_key());
            assert!(key.value() < KEY_MODULUS);
        }
    }

    #[test]
    fn test_closure_source() {
        let mut counter = 0u32;
        let mut source = || {
            counter += 1;
            VerificationKey::new(counter)
        };
        assert_eq!(source.next_key().value(), 1);
        assert_eq!(source.next_key().value(), 2);
    }
}
