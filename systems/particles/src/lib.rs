#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Particle bursts that celebrate planting, watering and harvesting.
//!
//! Kinematics are frame-rate dependent by contract: each advance moves a
//! particle by `velocity * dt * REFERENCE_FRAME_RATE`, so velocities are
//! expressed in canvas pixels per reference frame. Tests drive the system with
//! fixed synthetic time steps and a seeded generator.

use farm_dash_core::{palette, CanvasPoint, Event, Rgb};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frame rate the particle velocities are tuned for.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Downward velocity gained per second.
pub const GRAVITY: f32 = 0.5;

const MIN_LIFETIME: f32 = 0.5;
const MAX_LIFETIME: f32 = 1.0;
const MIN_SIZE: u32 = 3;
const MAX_SIZE: u32 = 6;

/// Shape of a single burst emission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstStyle {
    /// Number of particles emitted.
    pub count: usize,
    /// Upper bound of each velocity component's magnitude.
    pub speed: f32,
    /// Color shared by every particle of the burst.
    pub color: Rgb,
}

impl BurstStyle {
    /// Burst emitted when a seed goes into the ground.
    pub const PLANT: Self = Self {
        count: 8,
        speed: 3.0,
        color: palette::GREEN_DARK,
    };

    /// Burst emitted when a plot is watered.
    pub const WATER: Self = Self {
        count: 12,
        speed: 5.0,
        color: palette::BLUE_LIGHT,
    };

    /// Burst emitted when a crop is harvested.
    pub const HARVEST: Self = Self {
        count: 15,
        speed: 7.0,
        color: palette::YELLOW,
    };
}

/// Short-lived visual effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: Rgb,
    size: u32,
    life: f32,
    max_life: f32,
}

impl Particle {
    /// Creates a particle that lives for `life` seconds.
    #[must_use]
    pub fn new(position: Vec2, velocity: Vec2, color: Rgb, size: u32, life: f32) -> Self {
        Self {
            position,
            velocity,
            color,
            size,
            life,
            max_life: life,
        }
    }

    /// Current position on the canvas.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in pixels per reference frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Color of the particle.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Size the particle was emitted with.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Seconds left before the particle disappears.
    #[must_use]
    pub fn life(&self) -> f32 {
        self.life
    }

    /// Whether the particle still has lifetime left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Radius to draw with; shrinks with the remaining life, never below one pixel.
    #[must_use]
    pub fn rendered_radius(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 1.0;
        }
        let fraction = (self.life / self.max_life).max(0.0);
        (self.size as f32 * fraction).floor().max(1.0)
    }

    /// Moves the particle forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt * REFERENCE_FRAME_RATE;
        self.velocity.y += GRAVITY * dt;
        self.life -= dt;
    }
}

/// Owns every live particle and reacts to world events.
#[derive(Debug)]
pub struct Particles {
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl Particles {
    /// Creates an empty particle set whose randomness derives from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events, emitting bursts and advancing existing particles.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.advance(dt.as_secs_f32()),
                Event::CropPlanted { center, .. } => self.emit(*center, BurstStyle::PLANT),
                Event::PlotWatered { center, .. } => self.emit(*center, BurstStyle::WATER),
                Event::CropHarvested { center, .. } => self.emit(*center, BurstStyle::HARVEST),
                Event::SessionReset => self.particles.clear(),
                Event::GameStateChanged { .. }
                | Event::CropSelected { .. }
                | Event::CropRipened { .. }
                | Event::ActionRejected { .. } => {}
            }
        }
    }

    /// Emits a burst of particles centred on `at`.
    pub fn emit(&mut self, at: CanvasPoint, style: BurstStyle) {
        let origin = Vec2::new(at.x, at.y);
        let speed = style.speed.abs();
        self.particles.reserve(style.count);
        for _ in 0..style.count {
            let velocity = Vec2::new(
                self.rng.gen_range(-speed..=speed),
                self.rng.gen_range(-speed..=speed),
            );
            let life = self.rng.gen_range(MIN_LIFETIME..=MAX_LIFETIME);
            let size = self.rng.gen_range(MIN_SIZE..=MAX_SIZE);
            self.particles
                .push(Particle::new(origin, velocity, style.color, size, life));
        }
        log::trace!("emitted {} particles at {at:?}", style.count);
    }

    /// Advances every particle and drops the ones whose life ran out.
    pub fn advance(&mut self, dt: f32) {
        self.particles.retain_mut(|particle| {
            particle.advance(dt);
            particle.is_alive()
        });
    }

    /// Live particles in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particle is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
