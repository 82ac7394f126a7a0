//! Cosmetic effects: particle bursts, head trail and food pulse
//!
//! Driven by `GameEvent`s after each step and by frame time; never read by
//! the simulation. Positions are in window pixels.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{CELL_SIZE, HUD_HEIGHT};
use crate::settings::Settings;
use crate::sim::{Cell, GameEvent};

/// Particles per food burst
pub const BURST_SIZE: usize = 15;
/// Particle lifetime in seconds
pub const PARTICLE_LIFE: f32 = 1.0;
/// Number of palette entries particles pick from
pub const PARTICLE_PALETTE_LEN: u32 = 4;

/// Top-left pixel of a cell
pub fn cell_origin(cell: Cell) -> Vec2 {
    Vec2::new(
        cell.x as f32 * CELL_SIZE,
        cell.y as f32 * CELL_SIZE + HUD_HEIGHT,
    )
}

/// Center pixel of a cell
pub fn cell_center(cell: Cell) -> Vec2 {
    cell_origin(cell) + Vec2::splat(CELL_SIZE / 2.0)
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index
    pub color: u32,
    /// Seconds remaining
    pub life: f32,
    pub size: f32,
}

impl Particle {
    /// Remaining life in 0..=1
    pub fn life_ratio(&self) -> f32 {
        (self.life / PARTICLE_LIFE).clamp(0.0, 1.0)
    }
}

/// All live cosmetic state
#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    /// Recent head cells, newest first
    pub trail: VecDeque<Cell>,
    /// Food glow phase (radians)
    pub pulse: f32,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            trail: VecDeque::new(),
            pulse: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// React to the events of one step
    pub fn on_events(&mut self, events: &[GameEvent], settings: &Settings) {
        for event in events {
            match event {
                GameEvent::Started => self.clear(),
                GameEvent::Ate { cell } => self.burst(cell_center(*cell), settings.max_particles()),
                _ => {}
            }
        }
    }

    /// Record the head after a tick moved the snake
    pub fn record_head(&mut self, head: Cell, settings: &Settings) {
        let max = settings.trail_length();
        if max == 0 {
            self.trail.clear();
            return;
        }
        self.trail.push_front(head);
        self.trail.truncate(max);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.trail.clear();
    }

    /// Spawn a burst at `at`, keeping at most `cap` particles alive
    pub fn burst(&mut self, at: Vec2, cap: usize) {
        for _ in 0..BURST_SIZE {
            if self.particles.len() >= cap {
                break;
            }
            let vel = Vec2::new(
                self.rng.random_range(-3.0..3.0),
                self.rng.random_range(-3.0..3.0),
            ) * 60.0;
            self.particles.push(Particle {
                pos: at,
                vel,
                color: self.rng.random_range(0..PARTICLE_PALETTE_LEN),
                life: PARTICLE_LIFE,
                size: self.rng.random_range(2.0..5.0),
            });
        }
    }

    /// Advance particles and the food pulse by `dt` seconds
    pub fn update(&mut self, dt: f32, settings: &Settings) {
        let drag = 0.98_f32.powf(dt * 60.0);
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel *= drag;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if settings.effective_food_glow() {
            self.pulse = (self.pulse + dt * 12.0) % std::f32::consts::TAU;
        }
    }

    /// Extra glow radius around the food (pixels)
    pub fn food_glow(&self) -> f32 {
        5.0 + 3.0 * self.pulse.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_geometry() {
        assert_eq!(cell_origin(Cell::new(0, 0)), Vec2::new(0.0, 100.0));
        assert_eq!(cell_center(Cell::new(2, 1)), Vec2::new(62.5, 137.5));
    }

    #[test]
    fn test_burst_on_eat_and_decay() {
        let settings = Settings::default();
        let mut fx = Effects::new(9);
        let events = [GameEvent::Ate {
            cell: Cell::new(3, 3),
        }];
        fx.on_events(&events, &settings);
        assert_eq!(fx.particles.len(), BURST_SIZE);
        assert!(fx.particles.iter().all(|p| p.color < PARTICLE_PALETTE_LEN));

        fx.update(0.5, &settings);
        assert_eq!(fx.particles.len(), BURST_SIZE);
        fx.update(0.6, &settings);
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_particles_respect_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut fx = Effects::new(9);
        let events = [GameEvent::Ate {
            cell: Cell::new(3, 3),
        }];
        fx.on_events(&events, &settings);
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_trail_length() {
        let settings = Settings::default();
        let mut fx = Effects::new(1);
        for x in 0..10 {
            fx.record_head(Cell::new(x, 0), &settings);
        }
        assert_eq!(fx.trail.len(), settings.trail_length());
        assert_eq!(fx.trail[0], Cell::new(9, 0));
    }

    #[test]
    fn test_start_clears() {
        let settings = Settings::default();
        let mut fx = Effects::new(1);
        fx.burst(Vec2::ZERO, 100);
        fx.record_head(Cell::new(1, 1), &settings);
        fx.on_events(&[GameEvent::Started], &settings);
        assert!(fx.particles.is_empty());
        assert!(fx.trail.is_empty());
    }
}
