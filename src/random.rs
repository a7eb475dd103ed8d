//! Injectable random source for jitter, fallback starfields and ML-fallback
//! scores.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform sample source in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn unit(&self) -> f64;

    /// Uniform sample in `[lo, hi)`.
    fn range(&self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }
}

/// Production default: the thread-local generator, no seeding contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible sequence from a fixed seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&self) -> f64 {
        // A poisoned lock still holds a usable generator.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen::<f64>()
    }
}

/// Always returns the same sample. Values outside `[0, 1)` are clamped.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn unit(&self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_in_unit_interval() {
        let r = ThreadRandom;
        for _ in 0..1000 {
            let v = r.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn range_scales_sample() {
        assert_eq!(FixedRandom(0.5).range(-1000.0, 1000.0), 0.0);
        assert_eq!(FixedRandom(0.0).range(20.0, 50.0), 20.0);
        assert!(FixedRandom(1.0).unit() < 1.0);
    }
}
