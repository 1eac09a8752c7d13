//! World configuration
//!
//! Every physical constant of the game lives here so experiments can tweak
//! the environment from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable world constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play area ===
    /// Play area width
    pub width: f32,
    /// Play area height (floor line)
    pub height: f32,
    /// Frame rate used to derive the falling bound between gaps
    pub fps: f32,

    // === Bird ===
    /// Fixed horizontal position of the bird
    pub bird_x: f32,
    pub bird_radius: f32,
    pub flap_velocity: f32,
    pub gravity: f32,

    // === Walls ===
    pub wall_width: f32,
    /// Wall speed at the start of an episode
    pub base_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fps: FPS,

            bird_x: BIRD_X,
            bird_radius: BIRD_RADIUS,
            flap_velocity: FLAP_VELOCITY,
            gravity: GRAVITY,

            wall_width: WALL_WIDTH,
            base_speed: WALL_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(|c| c.sanitized())
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid game config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read game config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace non-positive or non-finite values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: &mut f32, fallback: f32| {
            if !value.is_finite() || *value <= 0.0 {
                *value = fallback;
            }
        };
        fix(&mut self.width, defaults.width);
        fix(&mut self.height, defaults.height);
        fix(&mut self.fps, defaults.fps);
        fix(&mut self.bird_radius, defaults.bird_radius);
        fix(&mut self.flap_velocity, defaults.flap_velocity);
        fix(&mut self.gravity, defaults.gravity);
        fix(&mut self.wall_width, defaults.wall_width);
        fix(&mut self.base_speed, defaults.base_speed);
        // Bird may sit at x = 0, but not off-screen
        if !self.bird_x.is_finite() || self.bird_x < 0.0 || self.bird_x > self.width {
            self.bird_x = (self.width / 2.0 - 200.0).max(0.0);
        }
        // Walls must roll their next gap before they wrap
        if self.gap_trigger_x() <= -self.wall_width {
            self.bird_radius = defaults.bird_radius;
            self.bird_x = (self.width / 2.0 - 200.0).max(0.0);
            if self.gap_trigger_x() <= -self.wall_width {
                self.bird_x = (3.0 * self.bird_radius / 2.0).floor();
            }
        }
        self
    }

    /// Vertical middle of the play area
    #[inline]
    pub fn midline(&self) -> f32 {
        (self.height / 2.0).floor()
    }

    /// Gap height a fresh wall starts with
    #[inline]
    pub fn initial_gap_height(&self) -> f32 {
        self.bird_radius * GAP_RADII
    }

    /// Gap height never shrinks below this
    #[inline]
    pub fn min_gap_height(&self) -> f32 {
        self.bird_radius * MIN_GAP_RADII
    }

    /// Wall x below which the next gap is rolled (bird x minus 1.5 radii)
    #[inline]
    pub fn gap_trigger_x(&self) -> f32 {
        self.bird_x - (3.0 * self.bird_radius / 2.0).floor()
    }

    /// Horizontal spawn position of the leading wall
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.width
    }
}
