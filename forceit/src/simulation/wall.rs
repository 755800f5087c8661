//! The passive wall: a fixed W x H grid of particles.
//!
//! Cell `(row, col)` lives at index `row * width + col` and rests at
//! `((col - width/2) * spacing, (row - height) * spacing, 0)`, so the
//! default 40 x 20 wall spans x in [-200, 200) and y in [-200, 0).
//!
//! Topology never changes after construction, only particle state does.
//! Per tick the wall runs `smoothing_pass -> gravity_pass -> integrate_pass`.

use std::time::Duration;

use super::states::{NVec3, Particle, ParticleView};

/// Weight applied to a neighbour accumulator for window radius `d`.
/// A zero window has no neighbours and weighs nothing.
pub fn smoothing_coefficient(d: usize) -> f64 {
    if d == 0 {
        return 0.0;
    }
    let d = d as f64;
    1.0 / (4.0 * d * (d + 1.0))
}

#[derive(Debug, Clone)]
pub struct WallField {
    width: usize,
    height: usize,
    spacing: f64,
    neighbor_window: usize,
    particles: Vec<Particle>,
}

impl WallField {
    /// Lay out `width * height` particles of `radius` at spacing `2 * radius`
    pub fn new(width: usize, height: usize, radius: f64, neighbor_window: usize) -> Self {
        let spacing = 2.0 * radius;
        let half_w = (width / 2) as f64;
        let h = height as f64;

        let mut particles = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let rest = NVec3::new(
                    (col as f64 - half_w) * spacing,
                    (row as f64 - h) * spacing,
                    0.0,
                );
                particles.push(Particle::new(rest, radius, Duration::ZERO));
            }
        }

        Self {
            width,
            height,
            spacing,
            neighbor_window,
            particles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn neighbor_window(&self) -> usize {
        self.neighbor_window
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Particle> {
        self.index(row, col).map(|i| &self.particles[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Particle> {
        self.index(row, col).map(move |i| &mut self.particles[i])
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Cells whose whole `(2d+1)^2` block stays on the grid.
    /// The border band of width `d` never smooths.
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        let d = self.neighbor_window;
        row >= d && row + d < self.height && col >= d && col + d < self.width
    }

    /// True when at least one cell is far enough from every edge to be smoothed
    pub fn has_smoothing_band(&self) -> bool {
        self.neighbor_window > 0
            && self.height > 2 * self.neighbor_window
            && self.width > 2 * self.neighbor_window
    }

    /// Pool every interior cell's neighbour displacements into its own
    /// accumulator, then fold all accumulators into velocity.
    /// A zero window disables smoothing.
    pub fn smoothing_pass(&mut self) {
        if self.neighbor_window == 0 {
            return;
        }
        let d = self.neighbor_window as isize;
        let w = self.width;

        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_interior(row, col) {
                    continue;
                }
                let center = row * w + col;

                for dr in -d..=d {
                    for dc in -d..=d {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        // interior guarantees both stay in range
                        let nr = (row as isize + dr) as usize;
                        let nc = (col as isize + dc) as usize;
                        let offset = self.particles[nr * w + nc].displacement();
                        self.particles[center].accumulate_neighbor_displacement(&offset);
                    }
                }
            }
        }

        let coefficient = smoothing_coefficient(self.neighbor_window);
        for p in &mut self.particles {
            p.apply_smoothing(coefficient);
        }
    }

    pub fn gravity_pass(&mut self, restoring_rate: f64) {
        for p in &mut self.particles {
            p.apply_restoring_gravity(restoring_rate);
        }
    }

    pub fn integrate_pass(&mut self) {
        for p in &mut self.particles {
            p.integrate();
        }
    }

    /// Grid-ordered `(position, radius)` views
    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().map(ParticleView::from)
    }
}
