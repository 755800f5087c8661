//! Windowless run: scripted skeleton, manual clock, periodic log lines

use crate::simulation::clock::ManualClock;
use crate::simulation::scenario::Scenario;
use crate::simulation::tracking::{LatestHandSample, ScriptedMotion};

/// Summary of a headless run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub ticks: u64,
    pub spawned: usize,
    pub collisions: usize,
    pub pruned: usize,
    pub live_forces: usize,
}

/// Run `ticks` steps, calibrating on the first sample.
///
/// `clock` must be the clock `scenario` was built with; it is advanced by one
/// tick period before every step.
pub fn run_headless(scenario: &mut Scenario, clock: &ManualClock, motion: &ScriptedMotion, ticks: u64) -> HeadlessSummary {
    let period = scenario.engine.tick_period();
    let log_every = scenario.engine.tick_hz.round().max(1.0) as u64;
    let latest = LatestHandSample::new();
    let mut summary = HeadlessSummary::default();

    for n in 0..ticks {
        let t = period.as_secs_f64() * n as f64;
        latest.publish(motion.sample(t));

        if !scenario.is_calibrated() {
            if let Some(skeleton) = latest.latest() {
                scenario.calibrate(&skeleton);
            }
        }

        clock.advance(period);
        let report = scenario.advance(latest.latest().as_ref());

        summary.ticks += 1;
        summary.spawned += report.spawned;
        summary.collisions += report.collisions;
        summary.pruned += report.pruned;
        summary.live_forces = report.live_forces;

        if (n + 1) % log_every == 0 {
            tracing::info!(
                tick = n + 1,
                live = report.live_forces,
                spawned = summary.spawned,
                collisions = summary.collisions,
                "headless progress"
            );
        }
    }
    summary
}
