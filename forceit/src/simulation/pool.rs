//! Transient force particles.
//!
//! Members enter only through [`ForcePool::spawn`] and leave only through
//! [`ForcePool::prune_expired_or_flagged`]. Order inside the pool carries no
//! meaning beyond the index used by the collision pairing.

use std::time::Duration;

use rand::Rng;

use super::states::{NVec3, Particle, ParticleView};
use super::vector::VectorOps;

/// One burst of force particles
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub origin: NVec3, // hand position in simulation space
    pub launch_velocity: NVec3, // shared starting velocity
    pub count: usize,
    pub spread_scale: f64, // jitter half-range is 0.5 * spread_scale per axis
    pub radius: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ForcePool {
    particles: Vec<Particle>,
}

impl ForcePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Add an already-built particle
    pub fn push(&mut self, p: Particle) {
        self.particles.push(p);
    }

    /// Largest collision radius currently in the pool
    pub fn max_radius(&self) -> f64 {
        self.particles.iter().map(|p| p.radius).fold(0.0, f64::max)
    }

    /// Spawn `req.count` particles, returns how many were added.
    ///
    /// Each axis of a new particle is `origin[k] * u_k * spread_scale` with
    /// `u_k` uniform in `[-0.5, 0.5)`. Nothing is spawned when the launch
    /// velocity has a zero component.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, req: &SpawnRequest, now: Duration) -> usize {
        if req.launch_velocity.has_zero_axis() {
            tracing::trace!(launch = ?req.launch_velocity, "degenerate launch velocity, spawn skipped");
            return 0;
        }

        self.particles.reserve(req.count);
        for _ in 0..req.count {
            let jitter = NVec3::new(
                (rng.gen::<f64>() - 0.5) * req.spread_scale,
                (rng.gen::<f64>() - 0.5) * req.spread_scale,
                (rng.gen::<f64>() - 0.5) * req.spread_scale,
            );
            let x = req.origin.component_mul(&jitter);
            self.particles.push(Particle::launched(x, req.launch_velocity, req.radius, now));
        }
        req.count
    }

    pub fn advance_all(&mut self) {
        for p in &mut self.particles {
            p.integrate();
        }
    }

    /// Drop consumed particles and those older than `max_age`.
    /// Compacts in one pass, survivors keep their relative order.
    pub fn prune_expired_or_flagged(&mut self, now: Duration, max_age: Duration) -> usize {
        let before = self.particles.len();
        self.particles
            .retain(|p| !p.pending_removal && !p.is_expired(now, max_age));
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().map(ParticleView::from)
    }
}
