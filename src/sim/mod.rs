//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per call
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Overlap, bird_wall_collision, detect_collision, out_of_bounds};
pub use obstacle::{GapPhase, ObstaclePair, ObstacleStream, Pacing, roll_gap};
pub use state::{BirdView, GameState, Snapshot, StepResult, WallView};
pub use tick::{CRASH_REWARD, positional_reward, step};
