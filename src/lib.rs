//! Flappy RL - A headless Flappy Bird environment for learning agents
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, obstacles, collisions, rewards)
//! - `agent`: Observation encoding, actions and the pluggable `Policy` trait
//! - `runner`: Episode driver feeding a policy and collecting training stats
//! - `stats`: Per-episode scores, period summaries and best episodes
//! - `config`: Data-driven world constants

pub mod agent;
pub mod config;
pub mod runner;
pub mod sim;
pub mod stats;

pub use agent::{Action, Observation, Policy};
pub use config::GameConfig;
pub use runner::{RunConfig, run_episodes};
pub use stats::TrainingStats;

/// Default world constants
pub mod consts {
    /// Play area width in pixels
    pub const WIDTH: f32 = 700.0;
    /// Play area height; also the floor line
    pub const HEIGHT: f32 = 500.0;
    /// Nominal frame rate the pacing bounds were tuned for
    pub const FPS: f32 = 60.0;

    /// Bird defaults
    pub const BIRD_X: f32 = WIDTH / 2.0 - 200.0;
    pub const BIRD_RADIUS: f32 = 20.0;
    /// Upward velocity set by a flap (pixels/step)
    pub const FLAP_VELOCITY: f32 = 2.75;
    /// Velocity lost every step (pixels/step²)
    pub const GRAVITY: f32 = 0.125;
    /// Spawn jitter as a fraction of the play height
    pub const SPAWN_JITTER: f32 = 0.3;

    /// Wall defaults
    pub const WALL_WIDTH: f32 = 50.0;
    pub const WALL_SPEED: f32 = 3.0;
    /// Initial gap height in bird radii
    pub const GAP_RADII: f32 = 8.0;
    /// Smallest gap height in bird radii
    pub const MIN_GAP_RADII: f32 = 1.05;
    /// Gap centers are drawn from midline ± this fraction of half the height
    pub const GAP_SPREAD: f32 = 0.6;

    /// Ground texture width; the scroll offset wraps here
    pub const GROUND_TILE_WIDTH: f32 = 432.0;

    /// Reward for clearing a wall
    pub const PASS_REWARD: f32 = 50.0;
}
