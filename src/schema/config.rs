//! Configuration types for Gray-Scott simulation parameters.

use serde::{Deserialize, Serialize};

use super::Shape;

/// Top-level simulation configuration, immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid side length in cells. The grid is always square and toroidal.
    pub size: usize,
    /// Seed shape used for fresh (non-resumed) runs.
    pub shape: Shape,
    /// Diffusion rate for species A (the substrate).
    pub diffusion_rate_a: f64,
    /// Diffusion rate for species B (the catalyst).
    pub diffusion_rate_b: f64,
    /// Feed rate (F parameter): replenishes A.
    pub feed_rate: f64,
    /// Kill rate (K parameter): removes B.
    pub kill_rate: f64,
    /// Integration time step.
    pub dt: f64,
    /// Iteration budget for the run.
    pub iterations: u64,
    /// Emit a running snapshot after every Nth step (>= 1).
    pub snapshot_every: u64,
    /// Seed for blob placement. None draws from entropy, which makes blob
    /// shapes non-deterministic across runs.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    /// Coral-like parameters of the reference app.
    fn default() -> Self {
        Self {
            size: 250,
            shape: Shape::Box,
            diffusion_rate_a: 1.0,
            diffusion_rate_b: 0.5,
            feed_rate: 0.055,
            kill_rate: 0.062,
            dt: 1.0,
            iterations: 5000,
            snapshot_every: 100,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Get total cell count (size * size).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if !(self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep);
        }
        if self.snapshot_every == 0 {
            return Err(ConfigError::InvalidSnapshotInterval);
        }
        if self.diffusion_rate_a < 0.0 || self.diffusion_rate_b < 0.0 {
            return Err(ConfigError::InvalidDiffusionRate);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid size must be positive")]
    InvalidSize,
    #[error("Time step must be positive")]
    InvalidTimeStep,
    #[error("Snapshot interval must be at least 1")]
    InvalidSnapshotInterval,
    #[error("Diffusion rates must be non-negative")]
    InvalidDiffusionRate,
}
