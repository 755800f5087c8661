//! Skeleton samples coming from the body tracker.
//!
//! All positions are in sensor space (metres, sensor at the origin, +z away
//! from the sensor). Samples are plain values; the one shared piece is
//! [`LatestHandSample`], the slot a sensor task writes and the tick reads.

use std::sync::{Arc, RwLock};

use bevy::prelude::Resource;

use super::states::NVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedHand {
    pub position: NVec3,
    pub is_open: bool,
}

impl TrackedHand {
    pub fn new(position: NVec3, is_open: bool) -> Self {
        Self { position, is_open }
    }
}

/// One tracked body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    pub right_hand: TrackedHand,
    pub left_hand: TrackedHand,
    pub right_shoulder: NVec3,
    pub spine_shoulder: NVec3,
    pub spine_mid: NVec3,
    pub spine_base: NVec3,
}

impl HandSample {
    /// The body closest to the sensor (smallest spine-base depth)
    pub fn nearest(bodies: &[HandSample]) -> Option<&HandSample> {
        bodies
            .iter()
            .min_by(|a, b| a.spine_base.z.total_cmp(&b.spine_base.z))
    }
}

/// Latest sample shared between the sensor side and the simulation tick.
/// Cloning shares the same slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestHandSample {
    slot: Arc<RwLock<Option<HandSample>>>,
}

impl LatestHandSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sample
    pub fn publish(&self, sample: HandSample) {
        match self.slot.write() {
            Ok(mut guard) => *guard = Some(sample),
            Err(poisoned) => *poisoned.into_inner() = Some(sample),
        }
    }

    /// Copy of the most recent sample, if any
    pub fn latest(&self) -> Option<HandSample> {
        match self.slot.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Forget the stored sample (tracking lost)
    pub fn clear(&self) {
        match self.slot.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

/// Synthetic body standing in for a real tracker.
///
/// A person stands `depth` metres in front of a sensor tilted so the floor
/// slopes away; both hands trace slow Lissajous paths and the right hand
/// opens whenever `sin(2t) > 0.3`.
#[derive(Resource, Debug, Clone)]
pub struct ScriptedMotion {
    pub depth: f64,
    pub shoulder_height: f64,
}

impl Default for ScriptedMotion {
    fn default() -> Self {
        Self {
            depth: 1.8,
            shoulder_height: 0.45,
        }
    }
}

impl ScriptedMotion {
    pub fn sample(&self, t: f64) -> HandSample {
        let z = self.depth;
        let sh = self.shoulder_height;

        let right_shoulder = NVec3::new(0.18, sh, z);
        let spine_shoulder = NVec3::new(0.0, sh + 0.02, z);
        let spine_mid = NVec3::new(0.0, sh - 0.25, z + 0.02);
        let spine_base = NVec3::new(0.0, sh - 0.55, z + 0.05);

        let right = NVec3::new(
            0.35 + 0.15 * (t * 0.5).sin(),
            sh + 0.1 * (t * 0.3).cos(),
            z - 0.45 - 0.1 * (t * 0.7).sin(),
        );
        let left = NVec3::new(
            -0.35 + 0.12 * (t * 0.4).sin(),
            sh - 0.2 + 0.08 * (t * 0.6).cos(),
            z - 0.2,
        );
        let open = (t * 2.0).sin() > 0.3;

        HandSample {
            right_hand: TrackedHand::new(right, open),
            left_hand: TrackedHand::new(left, false),
            right_shoulder,
            spine_shoulder,
            spine_mid,
            spine_base,
        }
    }

    /// Same body as [`ScriptedMotion::sample`], but the right hand follows a
    /// pointer at normalised window coordinates `(nx, ny)` in [-1, 1], y
    /// pointing down. The hand is open while `pressed`.
    pub fn pointer_sample(&self, t: f64, nx: f64, ny: f64, pressed: bool) -> HandSample {
        let mut body = self.sample(t);
        let nx = nx.clamp(-1.0, 1.0);
        let ny = ny.clamp(-1.0, 1.0);

        let right = NVec3::new(
            body.right_shoulder.x + 0.2 + 0.3 * nx,
            self.shoulder_height - 0.35 * ny,
            self.depth - 0.45,
        );
        body.right_hand = TrackedHand::new(right, pressed);
        body
    }
}
