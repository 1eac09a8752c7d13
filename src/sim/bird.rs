//! The bird: a circle moving only vertically under gravity

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::SPAWN_JITTER;

/// Steepest downward tilt the renderer should show (degrees)
pub const MAX_DIVE_TILT: f32 = -80.0;

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal position
    pub x: f32,
    /// Vertical position (screen space, grows downward)
    pub y: f32,
    /// Vertical velocity (positive = upward)
    pub vel: f32,
    pub radius: f32,
    /// Y the bird respawns around
    pub spawn_y: f32,
}

impl Bird {
    /// Create a bird at the midline with a random jitter
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let mut bird = Self {
            x: config.bird_x,
            y: config.midline(),
            vel: 0.0,
            radius: config.bird_radius,
            spawn_y: config.midline(),
        };
        bird.reset(config, rng);
        bird
    }

    /// Integrate one step.
    ///
    /// A flap overrides the velocity. Position only moves while the bird is
    /// above the floor, but gravity keeps accumulating either way.
    pub fn advance(&mut self, flap: bool, config: &GameConfig) {
        if flap {
            self.vel = config.flap_velocity;
        }

        if self.y + self.radius < config.height {
            self.y -= self.vel;
        }

        self.vel -= config.gravity;
    }

    /// Respawn near the spawn height with zero velocity
    pub fn reset<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        let jitter = rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
        self.x = config.bird_x;
        self.y = self.spawn_y + jitter * config.height;
        self.vel = 0.0;
    }

    /// Sprite rotation for renderers (degrees, counter-clockwise)
    pub fn tilt_degrees(&self, config: &GameConfig) -> f32 {
        if self.vel == 0.0 {
            return 0.0;
        }
        (self.vel * 45.0 / (2.0 * config.flap_velocity)).max(MAX_DIVE_TILT)
    }
}
