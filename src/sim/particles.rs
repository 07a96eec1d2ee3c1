//! Trail particle pool
//!
//! Particles are purely visual and render order is unspecified, so dead
//! particles are compacted with a reverse `swap_remove` sweep.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Integrate, Particle, Puck};
use crate::consts::*;

#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the particle budget; excess particles are dropped immediately
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.particles.truncate(capacity);
    }

    /// Spawn one trail particle at the puck, tinted with its colour.
    /// Returns false when the pool is full.
    pub fn emit_trail(&mut self, puck: &Puck, rng: &mut Pcg32) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_SCATTER..PARTICLE_SCATTER),
            rng.random_range(-PARTICLE_SCATTER..PARTICLE_SCATTER),
        );
        self.push(Particle::new(puck.body.pos, radius, puck.body.color, vel))
    }

    /// Insert a particle directly. Returns false when the pool is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Advance every particle and drop those whose life ran out this step
    pub fn age(&mut self, dt: f32) {
        for i in (0..self.particles.len()).rev() {
            self.particles[i].update(dt);
            if self.particles[i].is_dead() {
                self.particles.swap_remove(i);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}
