//! Core state types for the particle wall.
//!
//! Defines the shared vector alias and the [`Particle`] point mass used both
//! for the passive wall and for the transient force spray.
//!
//! A particle keeps two positions:
//! - `x`    current location, moved once per tick by `integrate`
//! - `rest` anchor the restoring spring pulls toward (meaningful for wall particles)

use std::time::Duration;

use nalgebra::Vector3;

use super::vector::VectorOps;

pub type NVec3 = Vector3<f64>;

/// Anything below this plane counts as having gone through the floor
pub const FLOOR_Z: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec3, // current position
    pub v: NVec3, // velocity, applied once per tick
    pub rest: NVec3, // rest anchor
    pub radius: f64, // collision radius
    pub created_at: Duration, // simulation time at construction
    pub pending_removal: bool, // consumed by a collision, dropped at the next prune
    neighbor_sum: NVec3, // smoothing scratch, cleared by integrate
}

impl Particle {
    /// Stationary particle resting at `x`
    pub fn new(x: NVec3, radius: f64, created_at: Duration) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Self {
            x,
            v: NVec3::zeros(),
            rest: x,
            radius,
            created_at,
            pending_removal: false,
            neighbor_sum: NVec3::zeros(),
        }
    }

    /// Particle launched from `x` with velocity `v`
    pub fn launched(x: NVec3, v: NVec3, radius: f64, created_at: Duration) -> Self {
        let mut p = Self::new(x, radius, created_at);
        p.add_velocity(&v);
        p
    }

    /// Weak spring toward the rest anchor, or a hard reset once below the floor
    pub fn apply_restoring_gravity(&mut self, rate: f64) {
        if self.x.z < FLOOR_Z {
            self.x.copy_from(&self.rest);
            self.v.reset();
        } else {
            let mut pull = NVec3::zeros();
            pull.set_sub(&self.rest, &self.x);
            pull *= rate;
            self.v += pull;
        }
    }

    pub fn accumulate_neighbor_displacement(&mut self, d: &NVec3) {
        self.neighbor_sum += d;
    }

    /// Add the scaled neighbour accumulator into velocity.
    /// `coefficient` is `1 / (4 d (d + 1))` for a window of radius `d`.
    pub fn apply_smoothing(&mut self, coefficient: f64) {
        self.neighbor_sum *= coefficient;
        self.v += self.neighbor_sum;
    }

    /// Explicit Euler with unit step
    pub fn integrate(&mut self) {
        self.x += self.v;
        self.neighbor_sum.reset();
    }

    pub fn add_velocity(&mut self, dv: &NVec3) {
        self.v += dv;
    }

    /// Offset of the current position from the rest anchor
    pub fn displacement(&self) -> NVec3 {
        self.x - self.rest
    }

    pub fn neighbor_sum(&self) -> &NVec3 {
        &self.neighbor_sum
    }

    /// Sphere overlap, strict: touching spheres do not collide
    pub fn overlaps(&self, other: &Particle) -> bool {
        let reach = self.radius + other.radius;
        (self.x - other.x).norm_squared() < reach * reach
    }

    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    pub fn is_expired(&self, now: Duration, max_age: Duration) -> bool {
        self.age(now) > max_age
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: NVec3,
    pub radius: f64,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.x,
            radius: p.radius,
        }
    }
}
