//! One fixed-order simulation tick
//!
//! smoothing -> gravity -> injection -> collision -> integration -> pruning
//!
//! Collision reads velocities before anything moves, and pruning runs last
//! so a force particle consumed this tick is gone before the next one.

use std::time::Duration;

use super::scenario::Scenario;
use super::tracking::HandSample;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize, // new force particles
    pub collisions: usize, // wall/force contacts resolved
    pub pruned: usize, // force particles removed
    pub live_forces: usize, // pool size after pruning
}

/// Advance the scenario by exactly one step at time `now`.
/// A missing sample means no injection this tick.
pub fn tick(scenario: &mut Scenario, now: Duration, sample: Option<&HandSample>) -> TickReport {
    let Scenario {
        parameters,
        wall,
        pool,
        resolver,
        injector,
        rng,
        ..
    } = scenario;

    // Wall forces: neighbour smoothing then the restoring spring
    wall.smoothing_pass();
    wall.gravity_pass(parameters.restoring_rate);

    let spawned = match sample {
        Some(s) => injector.inject(s, pool, rng, now),
        None => 0,
    };

    let collisions = resolver.resolve(wall, pool);

    // Move everything once
    wall.integrate_pass();
    pool.advance_all();

    let pruned = pool.prune_expired_or_flagged(now, parameters.max_force_age);

    TickReport {
        spawned,
        collisions,
        pruned,
        live_forces: pool.len(),
    }
}
