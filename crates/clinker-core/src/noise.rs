//! # Noise Sources
//!
//! The minor phases carry a small Gaussian jitter. Every draw goes through a
//! [`NoiseSource`] so callers choose between live randomness, a seeded
//! sequence, or no noise at all.

use crate::ClinkerError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use std::sync::{Mutex, PoisonError};

/// A source of zero-mean jitter.
///
/// Implementations are shared across request handlers, so draws must be
/// possible through `&self`.
pub trait NoiseSource: Send + Sync {
    /// Draw one sample.
    fn sample(&self) -> f64;
}

// =============================================================================
// GAUSSIAN NOISE
// =============================================================================

/// Normal(0, σ) jitter.
///
/// Unseeded instances draw from the calling thread's RNG. Seeded instances
/// share one `StdRng` behind a mutex, so a given seed always replays the same
/// sequence of draws.
#[derive(Debug)]
pub struct GaussianNoise {
    dist: Normal<f64>,
    rng: Option<Mutex<StdRng>>,
}

impl GaussianNoise {
    /// Jitter drawn from the thread-local RNG.
    pub fn new(std_dev: f64) -> Result<Self, ClinkerError> {
        Ok(Self {
            dist: normal(std_dev)?,
            rng: None,
        })
    }

    /// Reproducible jitter from a fixed seed.
    pub fn seeded(std_dev: f64, seed: u64) -> Result<Self, ClinkerError> {
        Ok(Self {
            dist: normal(std_dev)?,
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        })
    }

    /// Standard deviation of the distribution.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.dist.std_dev()
    }
}

fn normal(std_dev: f64) -> Result<Normal<f64>, ClinkerError> {
    Normal::new(0.0, std_dev).map_err(|e| {
        ClinkerError::ConfigError(format!("invalid noise deviation {}: {}", std_dev, e))
    })
}

impl NoiseSource for GaussianNoise {
    fn sample(&self) -> f64 {
        match &self.rng {
            Some(shared) => {
                let mut rng = shared.lock().unwrap_or_else(PoisonError::into_inner);
                self.dist.sample(&mut *rng)
            }
            None => self.dist.sample(&mut rand::thread_rng()),
        }
    }
}

// =============================================================================
// ZERO NOISE
// =============================================================================

/// Always returns 0.0. Makes predictions exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&self) -> f64 {
        0.0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_noise_is_zero() {
        let noise = ZeroNoise;
        assert_eq!(noise.sample(), 0.0);
        assert_eq!(noise.sample(), 0.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = GaussianNoise::seeded(0.1, 42).expect("noise");
        let b = GaussianNoise::seeded(0.1, 42).expect("noise");

        let draws_a: Vec<f64> = (0..16).map(|_| a.sample()).collect();
        let draws_b: Vec<f64> = (0..16).map(|_| b.sample()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn draws_stay_near_zero() {
        // 0.1 deviation: 1.0 is ten sigma away.
        let noise = GaussianNoise::new(0.1).expect("noise");
        for _ in 0..1000 {
            assert!(noise.sample().abs() < 1.0);
        }
    }

    #[test]
    fn negative_deviation_rejected() {
        let result = GaussianNoise::new(-1.0);
        assert!(matches!(result, Err(ClinkerError::ConfigError(_))));
    }

    #[test]
    fn std_dev_is_kept() {
        let noise = GaussianNoise::seeded(0.25, 7).expect("noise");
        assert_eq!(noise.std_dev(), 0.25);
    }
}
