//! Uniform-grid buckets over the force pool.
//!
//! Force particles are hashed by the cell containing their centre. A wall
//! particle only needs the cells its reach box `x ± reach` touches, where
//! `reach = wall_radius + max_force_radius`: any overlapping force particle
//! has its centre strictly inside that box.
//!
//! Candidates come back in ascending pool index so the resolver visits pairs
//! in the same order as the all-pairs scan.

use std::collections::HashMap;

use super::states::{NVec3, Particle};

type CellKey = (i64, i64, i64);

pub struct ForceBuckets {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl ForceBuckets {
    /// Hash every particle of `forces` into cells of edge `cell_size`
    pub fn build(forces: &[Particle], cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0);
        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (j, f) in forces.iter().enumerate() {
            cells.entry(Self::key(&f.x, cell_size)).or_default().push(j);
        }
        Self { cell_size, cells }
    }

    fn key(p: &NVec3, cell_size: f64) -> CellKey {
        (
            (p.x / cell_size).floor() as i64,
            (p.y / cell_size).floor() as i64,
            (p.z / cell_size).floor() as i64,
        )
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Pool indices whose cell intersects the box `center ± reach`, sorted
    pub fn candidates(&self, center: &NVec3, reach: f64, out: &mut Vec<usize>) {
        out.clear();
        let lo = Self::key(&center.add_scalar(-reach), self.cell_size);
        let hi = Self::key(&center.add_scalar(reach), self.cell_size);

        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    if let Some(bucket) = self.cells.get(&(cx, cy, cz)) {
                        out.extend_from_slice(bucket);
                    }
                }
            }
        }
        out.sort_unstable();
    }
}
