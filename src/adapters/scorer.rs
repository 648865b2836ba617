//! Pluggable scoring
//!
//! Every simulated value in the processors (confidence scores, property
//! predictions, jittered counts) is drawn through a `Scorer`, so a real model
//! or a deterministic stand-in can replace the RNG without touching the
//! orchestration code.

use rand::Rng;

/// Source of simulated scores
pub trait Scorer: Send + Sync {
    /// Sample in `[min, max)`. Returns `min` for an empty range.
    fn uniform(&self, min: f64, max: f64) -> f64;

    /// Integer in `[min, max)`. Returns `min` for an empty range.
    fn integer(&self, min: i64, max: i64) -> i64;

    /// Index in `[0, len)`. Returns 0 when `len == 0`.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local RNG backed scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScorer;

impl Scorer for RandomScorer {
    fn uniform(&self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }

    fn integer(&self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic scorer: every draw lands at the same relative position
/// of its range (0.5 = midpoint).
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer {
    fraction: f64,
}

impl FixedScorer {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn midpoint() -> Self {
        Self::new(0.5)
    }
}

impl Default for FixedScorer {
    fn default() -> Self {
        Self::midpoint()
    }
}

impl Scorer for FixedScorer {
    fn uniform(&self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.fraction
    }

    fn integer(&self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f64;
        let offset = (span * self.fraction).floor() as i64;
        (min + offset).min(max - 1)
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((len as f64 * self.fraction).floor() as usize).min(len - 1)
    }
}
