//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG with 64-bit state. Same seed → same sequence,
//! which is what makes two runs of the simulator comparable entry-for-entry.
//!
//! On top of the raw generator this module provides the few distributions the
//! simulator samples from: uniform reals, exponential inter-arrival times and
//! Bernoulli trials.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use shock_arb_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(123);
/// let delay = rng.uniform(80.0, 180.0);
/// assert!((80.0..180.0).contains(&delay));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 (xorshift has a fixed point at zero).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Current RNG state (a fresh `RngManager::new(state)` continues the sequence)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform real in `[low, high)`
    ///
    /// Returns `low` when the interval is empty (`low == high`).
    ///
    /// # Panics
    /// Panics if `low > high`
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        assert!(low <= high, "low must not exceed high");
        low + (high - low) * self.next_f64()
    }

    /// Exponential sample with the given mean (inverse CDF)
    ///
    /// Used for memoryless inter-arrival times of a Poisson process.
    ///
    /// # Panics
    /// Panics if `mean` is not positive
    pub fn exponential(&mut self, mean: f64) -> f64 {
        assert!(mean > 0.0, "mean must be positive");
        // 1 - u lies in (0, 1], so ln never sees zero
        let u = 1.0 - self.next_f64();
        -u.ln() * mean
    }

    /// Bernoulli trial: `true` with probability `p`
    ///
    /// `p <= 0.0` never succeeds and `p >= 1.0` always does.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "low must not exceed high")]
    fn test_uniform_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.uniform(10.0, 5.0);
    }

    #[test]
    #[should_panic(expected = "mean must be positive")]
    fn test_exponential_rejects_zero_mean() {
        let mut rng = RngManager::new(12345);
        rng.exponential(0.0);
    }

    #[test]
    fn test_uniform_degenerate_interval() {
        let mut rng = RngManager::new(7);
        assert_eq!(rng.uniform(450.0, 450.0), 450.0);
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = RngManager::new(99);
        for _ in 0..1000 {
            assert!(rng.bernoulli(1.0));
            assert!(!rng.bernoulli(0.0));
        }
    }

    #[test]
    fn test_exponential_mean_is_roughly_right() {
        let mut rng = RngManager::new(2024);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| rng.exponential(6000.0)).sum();
        let mean = total / n as f64;
        assert!(
            (mean - 6000.0).abs() < 300.0,
            "sample mean {} too far from 6000",
            mean
        );
    }
}
