//! Build fully-initialized installation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! [`Scenario`] containing:
//! - engine settings (`Engine`, the tick rate)
//! - numerical parameters (`Parameters`)
//! - the wall (`WallField`) and the force spray (`ForcePool`)
//! - collision resolver and injection controller
//! - the clock and the jitter RNG
//!
//! The scenario is inserted into Bevy as a `Resource` and advanced by the
//! fixed-rate tick system; renderers only read it through [`Scenario::snapshot`].

use std::time::Duration;

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::clock::{Clock, SystemClock};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{CollisionResolver, ElasticImpulse};
use crate::simulation::injection::InjectionController;
use crate::simulation::integrator::{tick, TickReport};
use crate::simulation::params::Parameters;
use crate::simulation::pool::ForcePool;
use crate::simulation::states::ParticleView;
use crate::simulation::tracking::HandSample;
use crate::simulation::wall::WallField;

/// Positions and radii for one frame, owned by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub wall: Vec<ParticleView>, // grid order
    pub forces: Vec<ParticleView>, // no particular order
}

#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub wall: WallField,
    pub pool: ForcePool,
    pub resolver: CollisionResolver,
    pub injector: InjectionController,
    pub rng: StdRng,
    clock: Box<dyn Clock + Send + Sync>,
    ticks: u64,
}

impl Scenario {
    /// Validate `cfg` and build a scenario on the system clock
    pub fn build(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        Self::build_with_clock(cfg, SystemClock::new())
    }

    pub fn build_with_clock(cfg: ScenarioConfig, clock: impl Clock + Send + Sync + 'static) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            tick_hz: cfg.engine.tick_hz,
        };

        // Parameters (runtime) from the wall/force sections
        let parameters = Parameters {
            restoring_rate: cfg.wall.restoring_rate,
            max_force_age: Duration::from_millis(cfg.force.max_age_ms),
            seed: cfg.seed,
        };

        let wall = WallField::new(
            cfg.wall.grid_width,
            cfg.wall.grid_height,
            cfg.wall.ball_radius,
            cfg.wall.neighbor_window,
        );

        let resolver = CollisionResolver::new(
            ElasticImpulse {
                m1: cfg.collision.m1,
                m2: cfg.collision.m2,
            },
            cfg.engine.broad_phase,
        );

        let injector = InjectionController::new(
            cfg.force.spawn_count,
            cfg.force.power_rate,
            cfg.force.force_radius,
            cfg.force.spread_rate,
            cfg.calibration.scale,
        );

        let rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if !wall.has_smoothing_band() {
            tracing::warn!(
                neighbor_window = wall.neighbor_window(),
                width = wall.width(),
                height = wall.height(),
                "smoothing band is empty for this grid, wall smoothing is inert"
            );
        }

        tracing::info!(
            walls = wall.len(),
            width = wall.width(),
            height = wall.height(),
            neighbor_window = wall.neighbor_window(),
            broad_phase = ?resolver.broad_phase(),
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            wall,
            pool: ForcePool::new(),
            resolver,
            injector,
            rng,
            clock: Box::new(clock),
            ticks: 0,
        })
    }

    /// Current time on the scenario clock
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// External calibration event: fix the sensor transform from `skeleton`
    pub fn calibrate(&mut self, skeleton: &HandSample) {
        self.injector.calibrate(skeleton);
    }

    pub fn is_calibrated(&self) -> bool {
        self.injector.is_calibrated()
    }

    /// Run one tick at the clock's current time
    pub fn advance(&mut self, sample: Option<&HandSample>) -> TickReport {
        let now = self.clock.now();
        self.advance_at(now, sample)
    }

    /// Run one tick at an explicit time
    pub fn advance_at(&mut self, now: Duration, sample: Option<&HandSample>) -> TickReport {
        let report = tick(self, now, sample);
        self.ticks += 1;
        if report.pruned > 0 || report.spawned > 0 {
            tracing::debug!(
                tick = self.ticks,
                spawned = report.spawned,
                collisions = report.collisions,
                pruned = report.pruned,
                live = report.live_forces,
                "tick"
            );
        }
        report
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            wall: self.wall.views().collect(),
            forces: self.pool.views().collect(),
        }
    }
}
