pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{NVec3, Particle, ParticleView};
pub use simulation::vector::VectorOps;
pub use simulation::wall::{WallField, smoothing_coefficient};
pub use simulation::pool::{ForcePool, SpawnRequest};
pub use simulation::forces::{CollisionResolver, CollisionResponse, ElasticImpulse, collision_flag};
pub use simulation::injection::{Calibration, InjectionController};
pub use simulation::tracking::{HandSample, TrackedHand, LatestHandSample, ScriptedMotion};
pub use simulation::clock::{Clock, SystemClock, ManualClock};
pub use simulation::integrator::{tick, TickReport};
pub use simulation::scenario::{Scenario, RenderSnapshot};

pub use configuration::config::{ScenarioConfig, EngineConfig, WallConfig, ForceConfig, CollisionConfig, CalibrationConfig, BroadPhaseConfig, ConfigError, parse_log_level};

pub use visualization::{viewer3d::run_viewer, headless::{run_headless, HeadlessSummary}};

pub use benchmark::benchmark::{bench_collision, bench_tick_curve};
