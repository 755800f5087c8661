//! Numerical parameters for the tick
//!
//! `Parameters` holds the runtime constants the frame loop passes into the
//! wall and the pool:
//! - restoring spring rate toward rest positions
//! - maximum age of a force particle
//! - seed of the spray jitter

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub restoring_rate: f64, // fraction of (rest - x) added to velocity per tick
    pub max_force_age: Duration, // force particles older than this are pruned
    pub seed: Option<u64>, // jitter seed, None = entropy
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            restoring_rate: 0.0005,
            max_force_age: Duration::from_millis(5000),
            seed: None,
        }
    }
}
