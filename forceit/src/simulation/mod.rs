pub mod states;
pub mod vector;
pub mod params;
pub mod engine;
pub mod clock;
pub mod wall;
pub mod pool;
pub mod forces;
pub mod broad_phase;
pub mod tracking;
pub mod injection;
pub mod integrator;
pub mod scenario;
