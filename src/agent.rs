//! Agent-facing side of the environment
//!
//! The simulation only understands `Action`. Agents see the world through a
//! coarse `Observation` and plug in through the `Policy` trait; learning
//! agents can additionally watch every transition via `Policy::observe`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Horizontal distance bucket width (pixels)
pub const DX_BUCKET: f32 = 22.0;
pub const MAX_DX_BUCKET: u8 = 50;
/// Vertical distance bucket height (pixels)
pub const DY_BUCKET: f32 = 15.0;
pub const MAX_DY_BUCKET: u8 = 27;

/// Number of distinct actions
pub const ACTION_COUNT: usize = 2;

/// The bird's only decision each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Glide,
    Flap,
}

impl Action {
    /// Decode an action index; anything but 1 glides
    pub fn from_index(index: u8) -> Self {
        if index == 1 { Action::Flap } else { Action::Glide }
    }

    pub fn index(self) -> u8 {
        match self {
            Action::Glide => 0,
            Action::Flap => 1,
        }
    }

    #[inline]
    pub fn is_flap(self) -> bool {
        self == Action::Flap
    }
}

/// Discretized view of the game for tabular agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Distance to the current wall in `DX_BUCKET` steps, 0..=50
    pub dx_bucket: u8,
    /// Vertical distance to the current gap in `DY_BUCKET` steps, 0..=27
    pub dy_bucket: u8,
    /// Bird is higher on screen than the current gap center
    pub above_gap: bool,
    /// Vertical distance to the following wall's gap
    pub next_dy_bucket: u8,
    pub above_next_gap: bool,
}

/// Bucket a signed vertical offset: (|floor(dy / 15)| capped, dy < 0)
fn vertical_bucket(dy: f32) -> (u8, bool) {
    let bucket = (dy / DY_BUCKET).floor().abs().min(MAX_DY_BUCKET as f32);
    (bucket as u8, dy < 0.0)
}

impl Observation {
    /// Encode the current game state
    pub fn from_state(state: &GameState) -> Self {
        let bird = &state.bird;
        let current = state.current_wall();
        let next = state.next_wall();

        let dx = ((current.x - bird.x) / DX_BUCKET)
            .floor()
            .clamp(0.0, MAX_DX_BUCKET as f32);
        let (dy_bucket, above_gap) = vertical_bucket(bird.y - current.gap);
        let (next_dy_bucket, above_next_gap) = vertical_bucket(bird.y - next.gap);

        Self {
            dx_bucket: dx as u8,
            dy_bucket,
            above_gap,
            next_dy_bucket,
            above_next_gap,
        }
    }

    /// Flat key, e.g. for indexing a lookup table
    pub fn as_tuple(&self) -> (u8, u8, u8, u8, u8) {
        (
            self.dx_bucket,
            self.dy_bucket,
            self.above_gap as u8,
            self.next_dy_bucket,
            self.above_next_gap as u8,
        )
    }
}

/// One step of experience
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub observation: Observation,
    pub action: Action,
    pub reward: f32,
    /// Observation after the step (of the fresh episode when `done`)
    pub next_observation: Observation,
    pub done: bool,
}

pub trait Policy: Send {
    fn name(&self) -> &str;
    fn act(&mut self, obs: &Observation) -> Action;

    /// Called after every step; learners update here
    fn observe(&mut self, _transition: &Transition) {}

    /// Called when an episode ends
    fn end_episode(&mut self, _score: u32) {}
}

/// Never flaps - useful for testing.
pub struct GlidePolicy;

impl Policy for GlidePolicy {
    fn name(&self) -> &str {
        "glide"
    }

    fn act(&mut self, _obs: &Observation) -> Action {
        Action::Glide
    }
}

/// Coin-flip baseline
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _obs: &Observation) -> Action {
        if self.rng.random_bool(0.5) {
            Action::Flap
        } else {
            Action::Glide
        }
    }
}

/// Hand-written baseline: flap whenever the bird sinks a bucket below the gap.
/// Velocity is not part of the observation, so it is never consulted.
pub struct GapFollowerPolicy;

impl Policy for GapFollowerPolicy {
    fn name(&self) -> &str {
        "follow"
    }

    fn act(&mut self, obs: &Observation) -> Action {
        if !obs.above_gap && obs.dy_bucket >= 1 {
            Action::Flap
        } else {
            Action::Glide
        }
    }
}

/// Resolve a built-in policy by name
pub fn policy_by_name(name: &str, seed: u64) -> Option<Box<dyn Policy>> {
    match name {
        "glide" => Some(Box::new(GlidePolicy)),
        "random" => Some(Box::new(RandomPolicy::new(seed))),
        "follow" => Some(Box::new(GapFollowerPolicy)),
        _ => None,
    }
}
