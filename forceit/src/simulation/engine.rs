//! High-level runtime engine settings
//!
//! The fixed tick rate used when running a `Scenario`. The collision
//! broad phase is owned by the `CollisionResolver`.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Engine {
    pub tick_hz: f64, // ticks per second
}

impl Engine {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz)
    }
}
