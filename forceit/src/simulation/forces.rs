//! Wall/force collision detection and response
//!
//! [`CollisionResolver`] pairs every wall particle with every force particle
//! (directly or through [`ForceBuckets`]) and, on overlap, adds the impulse
//! from its [`CollisionResponse`] to the wall particle and marks the force
//! particle consumed.

use crate::configuration::config::BroadPhaseConfig;

use super::broad_phase::ForceBuckets;
use super::pool::ForcePool;
use super::states::{NVec3, Particle};
use super::wall::WallField;

/// Velocity change handed to a wall particle hit by a force particle
pub trait CollisionResponse {
    fn impulse(&self, wall_v: &NVec3, force_v: &NVec3) -> NVec3;
}

/// Component-wise 1D elastic collision formula
///
/// `((m1 - m2) * v_wall + 2 m2 * v_force) / (m1 + m2)`
///
/// With `m1 == m2` this is just `v_force`.
#[derive(Debug, Clone, Copy)]
pub struct ElasticImpulse {
    pub m1: f64, // wall particle mass
    pub m2: f64, // force particle mass
}

impl Default for ElasticImpulse {
    fn default() -> Self {
        Self { m1: 1.0, m2: 1.0 }
    }
}

impl CollisionResponse for ElasticImpulse {
    fn impulse(&self, wall_v: &NVec3, force_v: &NVec3) -> NVec3 {
        let a = 1.0 / (self.m1 + self.m2);
        (wall_v * (self.m1 - self.m2) + force_v * (2.0 * self.m2)) * a
    }
}

/// Strict sphere overlap test between a wall and a force particle
pub fn collision_flag(ball: &Particle, force: &Particle) -> bool {
    ball.overlaps(force)
}

pub struct CollisionResolver {
    response: Box<dyn CollisionResponse + Send + Sync>,
    broad_phase: BroadPhaseConfig,
}

impl CollisionResolver {
    pub fn new(response: impl CollisionResponse + Send + Sync + 'static, broad_phase: BroadPhaseConfig) -> Self {
        Self {
            response: Box::new(response),
            broad_phase,
        }
    }

    pub fn broad_phase(&self) -> BroadPhaseConfig {
        self.broad_phase
    }

    pub fn set_broad_phase(&mut self, broad_phase: BroadPhaseConfig) {
        self.broad_phase = broad_phase;
    }

    /// Resolve all wall/force contacts for this tick, returns the number of hits.
    ///
    /// Pairs with equal wall and pool index are skipped. A force particle
    /// already marked for removal never strikes again.
    pub fn resolve(&self, wall: &mut WallField, pool: &mut ForcePool) -> usize {
        if pool.is_empty() {
            return 0;
        }
        match self.broad_phase {
            BroadPhaseConfig::AllPairs => self.resolve_all_pairs(wall.particles_mut(), pool.particles_mut()),
            BroadPhaseConfig::Buckets => {
                let reach_pad = pool.max_radius();
                self.resolve_bucketed(wall.particles_mut(), pool.particles_mut(), reach_pad)
            }
        }
    }

    fn resolve_all_pairs(&self, balls: &mut [Particle], forces: &mut [Particle]) -> usize {
        let mut hits = 0;
        for (i, ball) in balls.iter_mut().enumerate() {
            for (j, force) in forces.iter_mut().enumerate() {
                if i == j {
                    continue;
                }
                if self.strike(ball, force) {
                    hits += 1;
                }
            }
        }
        hits
    }

    fn resolve_bucketed(&self, balls: &mut [Particle], forces: &mut [Particle], max_force_radius: f64) -> usize {
        let mut hits = 0;
        let mut candidates = Vec::new();

        let max_ball_radius = balls.iter().map(|b| b.radius).fold(0.0, f64::max);
        let buckets = ForceBuckets::build(forces, max_ball_radius + max_force_radius);

        for (i, ball) in balls.iter_mut().enumerate() {
            buckets.candidates(&ball.x, ball.radius + max_force_radius, &mut candidates);
            for &j in &candidates {
                if i == j {
                    continue;
                }
                if self.strike(ball, &mut forces[j]) {
                    hits += 1;
                }
            }
        }
        hits
    }

    fn strike(&self, ball: &mut Particle, force: &mut Particle) -> bool {
        if force.pending_removal || !collision_flag(ball, force) {
            return false;
        }
        let dv = self.response.impulse(&ball.v, &force.v);
        ball.add_velocity(&dv);
        force.pending_removal = true;
        true
    }
}
