//! Secret number generation

use log::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::guessing_game::Range;

/// Anything that can pick the secret for a new session
pub trait SecretSource {
    /// Pick a number in `range`, both ends inclusive. `range` must not be inverted.
    fn generate(&mut self, range: Range) -> i64;
}

/// Uniform secrets from a seedable generator
pub struct SecretGenerator {
    rng: StdRng,
    seed: u64,
}

impl SecretGenerator {
    /// Deterministic generator, the same seed replays the same secrets
    pub fn seeded(seed: u64) -> Self {
        info!("Secret generator seeded with {}", seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SecretSource for SecretGenerator {
    fn generate(&mut self, range: Range) -> i64 {
        let secret = self.rng.random_range(range.min..=range.max);
        debug!("Generated secret {} in {}", secret, range);
        secret
    }
}

/// Always hands out the same secret
#[cfg(test)]
pub struct Fixed(pub i64);

#[cfg(test)]
impl SecretSource for Fixed {
    fn generate(&mut self, _range: Range) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_stays_in_range() {
        let mut secrets = SecretGenerator::seeded(42);
        for range in [Range::new(1, 100), Range::new(1, 50), Range::new(-5, 5)] {
            for _ in 0..1000 {
                assert!(range.contains(secrets.generate(range)));
            }
        }
    }

    #[test]
    fn test_generate_single_value_range() {
        let mut secrets = SecretGenerator::seeded(7);
        assert_eq!(secrets.generate(Range::new(9, 9)), 9);
    }

    #[test]
    fn test_generate_hits_both_ends() {
        let mut secrets = SecretGenerator::seeded(3);
        let range = Range::new(1, 4);
        let drawn: Vec<i64> = (0..500).map(|_| secrets.generate(range)).collect();
        assert!(drawn.contains(&1));
        assert!(drawn.contains(&4));
    }

    #[test]
    fn test_same_seed_same_secrets() {
        let mut a = SecretGenerator::seeded(13502460);
        let mut b = SecretGenerator::seeded(13502460);
        let range = Range::new(1, 200);
        for _ in 0..20 {
            assert_eq!(a.generate(range), b.generate(range));
        }
        assert_eq!(a.seed(), 13502460);
    }
}
