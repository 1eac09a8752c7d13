//! Game state and core simulation types
//!
//! Everything a step mutates lives in `GameState`. Renderers read it through
//! `Snapshot`, which is plain data and serializable.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::obstacle::{GapPhase, ObstaclePair, ObstacleStream};
use crate::config::GameConfig;
use crate::consts::GROUND_TILE_WIDTH;

/// Outcome of a single step, as seen by the agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub reward: f32,
    /// The bird crashed; the game has already been reset
    pub done: bool,
    /// Total score before this step was applied
    pub score: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub bird: Bird,
    pub walls: ObstacleStream,
    /// What each wall did on the last step
    pub wall_phases: [GapPhase; 2],
    /// Steps since the last reset
    pub frame: u64,
    /// Total score as of the start of the last step
    pub score: u32,
    /// Slot of the wall the bird is heading for
    pub current: usize,
    /// Horizontal scroll of the ground strip (renderer only)
    pub ground_offset: f32,
    /// Episodes finished so far
    pub episodes: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with default constants
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Create a new game with the given constants
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let bird = Bird::new(&config, &mut rng);
        let walls = ObstacleStream::new(&config, &mut rng);

        Self {
            config,
            seed,
            bird,
            walls,
            wall_phases: [GapPhase::Approaching; 2],
            frame: 0,
            score: 0,
            current: 0,
            ground_offset: 0.0,
            episodes: 0,
            rng,
        }
    }

    /// The wall the bird has not cleared yet
    pub fn current_wall(&self) -> &ObstaclePair {
        &self.walls.pairs[self.current]
    }

    /// The wall after the current one
    pub fn next_wall(&self) -> &ObstaclePair {
        &self.walls.pairs[1 - self.current]
    }

    /// Sum of both walls' scores
    pub fn total_score(&self) -> u32 {
        self.walls.total_score()
    }

    /// Move every entity one step (no collision or reward)
    pub(crate) fn advance(&mut self, flap: bool) {
        self.bird.advance(flap, &self.config);
        self.wall_phases = self.walls.advance(&self.config, &mut self.rng);

        self.ground_offset -= self.walls.speed();
        if self.ground_offset < -GROUND_TILE_WIDTH {
            self.ground_offset = 0.0;
        }
    }

    /// Soft respawn: positions, velocities, gaps and pacing back to baseline
    pub fn reset(&mut self) {
        self.frame = 0;
        self.score = 0;
        self.bird.reset(&self.config, &mut self.rng);
        self.walls.reset(&self.config, &mut self.rng);
        self.wall_phases = [GapPhase::Approaching; 2];
        self.current = self.walls.current_index();
        self.ground_offset = 0.0;
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            score: self.score,
            speed: self.walls.speed(),
            ground_offset: self.ground_offset,
            current: self.current,
            phases: self.wall_phases,
            bird: BirdView {
                x: self.bird.x,
                y: self.bird.y,
                radius: self.bird.radius,
                tilt: self.bird.tilt_degrees(&self.config),
            },
            walls: [
                WallView::from(&self.walls.pairs[0]),
                WallView::from(&self.walls.pairs[1]),
            ],
        }
    }
}

/// Bird as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Sprite rotation in degrees
    pub tilt: f32,
}

/// Wall as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallView {
    pub x: f32,
    pub width: f32,
    pub gap: f32,
    pub gap_height: f32,
}

impl From<&ObstaclePair> for WallView {
    fn from(wall: &ObstaclePair) -> Self {
        Self {
            x: wall.x,
            width: wall.width,
            gap: wall.gap,
            gap_height: wall.gap_height,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub score: u32,
    pub speed: f32,
    pub ground_offset: f32,
    pub current: usize,
    pub phases: [GapPhase; 2],
    pub bird: BirdView,
    pub walls: [WallView; 2],
}
