//! In-place vector helpers on top of nalgebra
//!
//! nalgebra already covers add (`+=`), scale (`*=`), `dot`, `norm_squared`,
//! `norm` and `copy_from`. The few operations the particle code leans on
//! that nalgebra spells differently live in [`VectorOps`].

use super::states::NVec3;

pub trait VectorOps {
    /// `self = target - current`
    fn set_sub(&mut self, target: &NVec3, current: &NVec3);

    /// Zero all components
    fn reset(&mut self);

    /// Scale to unit length, zero-length vectors are left untouched
    fn normalize_or_keep(&mut self);

    /// True if any component is exactly zero
    fn has_zero_axis(&self) -> bool;
}

impl VectorOps for NVec3 {
    fn set_sub(&mut self, target: &NVec3, current: &NVec3) {
        self.x = target.x - current.x;
        self.y = target.y - current.y;
        self.z = target.z - current.z;
    }

    fn reset(&mut self) {
        self.fill(0.0);
    }

    fn normalize_or_keep(&mut self) {
        // try_normalize_mut leaves the vector as-is when norm <= 0
        let _ = self.try_normalize_mut(0.0);
    }

    fn has_zero_axis(&self) -> bool {
        self.iter().any(|c| *c == 0.0)
    }
}
