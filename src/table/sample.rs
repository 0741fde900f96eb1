//! Seeded row sampling
//!
//! Bernoulli sampling with a fixed seed followed by a hard row limit. The
//! same seed over the same input always keeps the same rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Probability of keeping each row, in (0, 1]
    pub fraction: f64,
    pub seed: u64,
    /// Maximum number of rows kept
    pub limit: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            fraction: 0.0035,
            seed: 42,
            limit: 100_000,
        }
    }
}

impl SampleConfig {
    /// Keep every row, up to `limit`
    pub fn all(limit: usize) -> Self {
        Self {
            fraction: 1.0,
            seed: 0,
            limit,
        }
    }
}

/// Applies a `SampleConfig` to a row set
#[derive(Debug)]
pub struct Sampler {
    config: SampleConfig,
    rng: StdRng,
}

impl Sampler {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    pub fn sample<T>(&mut self, rows: Vec<T>) -> Vec<T> {
        let input = rows.len();
        let fraction = self.config.fraction.clamp(0.0, 1.0);

        let kept: Vec<T> = if fraction >= 1.0 {
            rows.into_iter().take(self.config.limit).collect()
        } else {
            let rng = &mut self.rng;
            rows.into_iter()
                .filter(|_| rng.gen_bool(fraction))
                .take(self.config.limit)
                .collect()
        };

        info!(input, sampled = kept.len(), fraction, limit = self.config.limit, "Sampled rows");
        kept
    }
}
