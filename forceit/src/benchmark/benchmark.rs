use std::time::{Duration, Instant};

use crate::configuration::config::{BroadPhaseConfig, ConfigError, ScenarioConfig};
use crate::simulation::clock::ManualClock;
use crate::simulation::forces::{CollisionResolver, ElasticImpulse};
use crate::simulation::pool::ForcePool;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec3, Particle};
use crate::simulation::wall::WallField;

/// Deterministic pool of `n` force particles spread over the default wall
fn make_pool(n: usize) -> ForcePool {
    let mut pool = ForcePool::new();
    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 200.0,
            -100.0 + (i_f * 0.13).cos() * 100.0,
            (i_f * 0.07).sin() * 20.0,
        );
        let v = NVec3::new(0.1, 0.1, 1.0);
        pool.push(Particle::launched(x, v, 1.0, Duration::ZERO));
    }
    pool
}

fn make_wall() -> WallField {
    let w = ScenarioConfig::default().wall;
    WallField::new(w.grid_width, w.grid_height, w.ball_radius, w.neighbor_window)
}

/// Time one collision pass for a range of pool sizes with both broad phases
pub fn bench_collision() {
    let ns = [500, 1000, 2000, 4000, 8000, 16000];
    let wall_template = make_wall();

    for n in ns {
        let pool_template = make_pool(n);

        let direct = CollisionResolver::new(ElasticImpulse::default(), BroadPhaseConfig::AllPairs);
        let buckets = CollisionResolver::new(ElasticImpulse::default(), BroadPhaseConfig::Buckets);

        // Warm up
        direct.resolve(&mut wall_template.clone(), &mut pool_template.clone());
        buckets.resolve(&mut wall_template.clone(), &mut pool_template.clone());

        let mut wall = wall_template.clone();
        let mut pool = pool_template.clone();
        let t0 = Instant::now();
        let hits_direct = direct.resolve(&mut wall, &mut pool);
        let dt_direct = t0.elapsed().as_secs_f64();

        let mut wall = wall_template.clone();
        let mut pool = pool_template.clone();
        let t1 = Instant::now();
        let hits_buckets = buckets.resolve(&mut wall, &mut pool);
        let dt_buckets = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, all pairs = {:8.6} s ({hits_direct} hits), buckets = {:8.6} s ({hits_buckets} hits)",
            dt_direct, dt_buckets
        );
    }
}

/// Uncalibrated default scenario on a manual clock
fn make_scenario(broad_phase: BroadPhaseConfig) -> Result<Scenario, ConfigError> {
    let mut cfg = ScenarioConfig::default();
    cfg.engine.broad_phase = broad_phase;
    cfg.seed = Some(42);
    Scenario::build_with_clock(cfg, ManualClock::new())
}

/// Average full-tick cost with `n` live force particles
fn time_tick(broad_phase: BroadPhaseConfig, n: usize, steps: usize) -> Result<f64, ConfigError> {
    let mut scenario = make_scenario(broad_phase)?;
    let pool_template = make_pool(n);

    let mut total = 0.0;
    for _ in 0..steps {
        // refill, collisions consume particles
        scenario.pool = pool_template.clone();
        let t0 = Instant::now();
        scenario.advance_at(Duration::ZERO, None);
        total += t0.elapsed().as_secs_f64() * 1000.0;
    }
    Ok(total / steps as f64)
}

/// Full tick cost for both broad phases
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() -> Result<(), ConfigError> {
    println!("N,all_pairs_ms,buckets_ms");

    for n in (500..=16000).step_by(500) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 4000 { 5 } else { 1 };
        let ms_direct = time_tick(BroadPhaseConfig::AllPairs, n, steps)?;
        let ms_buckets = time_tick(BroadPhaseConfig::Buckets, n, steps)?;
        println!("{},{:.6},{:.6}", n, ms_direct, ms_buckets);
    }
    Ok(())
}
