//! Hand motion -> force bursts
//!
//! The controller maps a [`HandSample`] from sensor space into simulation
//! space through a [`Calibration`] fixed once by an explicit calibration
//! event, and turns an open right hand into a [`SpawnRequest`].
//!
//! Calibration is three affine steps applied in order:
//! 1. rotate about x by `theta = acos(min(spine_base.z / 2, 1))` (sensor tilt)
//! 2. shift y by `-spine_mid.y` so the mid spine sits at height zero
//! 3. scale by `(s, -s, -s)`, mirroring y and z into simulation axes

use std::time::Duration;

use nalgebra::{Rotation3, Vector3};
use rand::Rng;

use super::pool::{ForcePool, SpawnRequest};
use super::states::NVec3;
use super::tracking::HandSample;
use super::vector::VectorOps;

#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub theta: f64, // sensor tilt, radians
    pub translate_y: f64,
    pub scale: NVec3,
    rotation: Rotation3<f64>,
}

impl Calibration {
    pub fn new(theta: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            theta,
            translate_y,
            scale: NVec3::new(scale, -scale, -scale),
            rotation: Rotation3::from_axis_angle(&Vector3::x_axis(), theta),
        }
    }

    /// Derive the transform from the skeleton seen at calibration time
    pub fn from_skeleton(skeleton: &HandSample, scale: f64) -> Self {
        // acos is only defined on [-1, 1]
        let c = (skeleton.spine_base.z / 2.0).clamp(-1.0, 1.0);
        Self::new(c.acos(), -skeleton.spine_mid.y, scale)
    }

    /// rotate -> translate -> scale
    pub fn transform_point(&self, p: &NVec3) -> NVec3 {
        let mut q = self.rotation * p;
        q.y += self.translate_y;
        q.component_mul(&self.scale)
    }
}

#[derive(Debug, Clone)]
pub struct InjectionController {
    pub spawn_count: usize,
    pub power_rate: f64,
    pub force_radius: f64,
    pub spread_rate: f64,
    pub scale: f64,
    calibration: Option<Calibration>,
}

impl InjectionController {
    pub fn new(spawn_count: usize, power_rate: f64, force_radius: f64, spread_rate: f64, scale: f64) -> Self {
        Self {
            spawn_count,
            power_rate,
            force_radius,
            spread_rate,
            scale,
            calibration: None,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Fix the sensor -> simulation transform from this skeleton
    pub fn calibrate(&mut self, skeleton: &HandSample) -> &Calibration {
        let cal = Calibration::from_skeleton(skeleton, self.scale);
        tracing::info!(
            theta_deg = cal.theta.to_degrees(),
            translate_y = cal.translate_y,
            "calibrated sensor transform"
        );
        self.calibration.insert(cal)
    }

    pub fn reset_calibration(&mut self) {
        self.calibration = None;
    }

    /// Burst requested by this sample, `None` while uncalibrated.
    ///
    /// A closed right hand leaves the shoulder->hand vector at zero, which
    /// keeps the launch velocity degenerate and the spawn empty.
    pub fn plan(&self, sample: &HandSample) -> Option<SpawnRequest> {
        let cal = self.calibration.as_ref()?;

        let mut right_vec = NVec3::zeros();
        if sample.right_hand.is_open {
            right_vec.set_sub(&sample.right_hand.position, &sample.right_shoulder);
        }

        let right_hand = cal.transform_point(&sample.right_hand.position);
        let left_hand = cal.transform_point(&sample.left_hand.position);
        let spine_base = cal.transform_point(&sample.spine_base);
        let launch_velocity = cal.transform_point(&(right_vec * self.power_rate));

        let spread_scale = (spine_base - left_hand).norm() * self.spread_rate;

        Some(SpawnRequest {
            origin: right_hand,
            launch_velocity,
            count: self.spawn_count,
            spread_scale,
            radius: self.force_radius,
        })
    }

    /// Plan and spawn in one go, returns the number of particles added
    pub fn inject<R: Rng>(&self, sample: &HandSample, pool: &mut ForcePool, rng: &mut R, now: Duration) -> usize {
        let Some(req) = self.plan(sample) else {
            tracing::trace!("not calibrated, injection skipped");
            return 0;
        };
        let spawned = pool.spawn(rng, &req, now);
        if spawned > 0 {
            tracing::debug!(spawned, spread = req.spread_scale, "force burst");
        }
        spawned
    }
}
