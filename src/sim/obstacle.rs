//! Walls and the two-slot stream that feeds them
//!
//! Each wall rolls its next gap while the bird is passing it, then applies
//! that gap when it wraps around to the right edge. Consecutive gaps are kept
//! reachable: the bird can only climb (or fall) so far in the time a wall
//! needs to cross half the screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::GAP_SPREAD;

/// Where a wall is in its pass across the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPhase {
    /// Moving toward the bird, next gap not rolled yet
    Approaching,
    /// Next gap rolled (and scored), waiting to wrap
    GapPending,
    /// Wrapped to the right edge this step
    Recycled,
}

/// State shared by both walls: difficulty pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    /// Gap center rolled most recently by either wall
    pub last_gap: f32,
    /// Horizontal speed of every wall (pixels/step)
    pub speed: f32,
}

impl Pacing {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            last_gap: config.midline(),
            speed: config.base_speed,
        }
    }

    /// Largest (upward, downward) change between consecutive gap centers.
    ///
    /// Upward: what repeated flapping gains while a wall crosses half the
    /// screen. Downward: free-fall over the same window.
    pub fn gap_bounds(&self, config: &GameConfig) -> (f32, f32) {
        let steps = (config.width / 2.0).floor() / self.speed;
        let up = steps * config.flap_velocity * 0.7;
        let down = steps * config.gravity * config.fps * 0.5;
        (up, down)
    }

    /// Pull a candidate gap within reach of the last one and remember it
    pub fn constrain(&mut self, candidate: f32, config: &GameConfig) -> f32 {
        let (up, down) = self.gap_bounds(config);
        let mut gap = candidate;
        if self.last_gap - gap > up {
            gap = self.last_gap - up;
        }
        if gap - self.last_gap > down {
            gap = self.last_gap + down;
        }
        self.last_gap = gap;
        gap
    }
}

/// Draw a gap center from the middle band of the play area
pub fn roll_gap<R: Rng>(config: &GameConfig, rng: &mut R) -> f32 {
    let spread = rng.random_range(-GAP_SPREAD..=GAP_SPREAD);
    config.midline() - (spread * config.height / 2.0).floor()
}

/// A single wall with one gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Horizontal center
    pub x: f32,
    /// Where the wall starts an episode
    pub start_x: f32,
    /// Where the wall reappears after wrapping
    pub spawn_x: f32,
    pub width: f32,
    /// Vertical center of the gap
    pub gap: f32,
    pub gap_height: f32,
    /// Gap to apply on the next wrap
    pub pending_gap: Option<f32>,
    /// Walls cleared by this slot
    pub score: u32,
}

impl ObstaclePair {
    /// Create a wall; `trailing` places it behind the leading one
    pub fn new<R: Rng>(config: &GameConfig, trailing: bool, rng: &mut R) -> Self {
        let spawn_x = config.spawn_x();
        let start_x = if trailing {
            (3.0 * spawn_x / 2.0).floor() + (config.wall_width / 2.0).floor()
        } else {
            spawn_x
        };
        Self {
            x: start_x,
            start_x,
            spawn_x,
            width: config.wall_width,
            gap: roll_gap(config, rng),
            gap_height: config.initial_gap_height(),
            pending_gap: None,
            score: 0,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.width / 2.0).floor()
    }

    #[inline]
    pub fn half_gap(&self) -> f32 {
        (self.gap_height / 2.0).floor()
    }

    /// Lower edge of the top pipe
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap - self.half_gap()
    }

    /// Upper edge of the bottom pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap + self.half_gap()
    }

    pub fn phase(&self) -> GapPhase {
        if self.pending_gap.is_some() {
            GapPhase::GapPending
        } else {
            GapPhase::Approaching
        }
    }

    /// Move one step left, rolling and applying gaps as thresholds are crossed
    pub fn advance<R: Rng>(
        &mut self,
        pacing: &mut Pacing,
        config: &GameConfig,
        rng: &mut R,
    ) -> GapPhase {
        self.x -= pacing.speed;

        if self.x < config.gap_trigger_x() && self.pending_gap.is_none() {
            let candidate = roll_gap(config, rng);
            self.pending_gap = Some(pacing.constrain(candidate, config));
            self.score += 1;
        }

        if self.x < -self.width {
            self.recycle(pacing, config);
            return GapPhase::Recycled;
        }

        self.phase()
    }

    /// Wrap to the right edge with the pending gap and tighter difficulty
    fn recycle(&mut self, pacing: &mut Pacing, config: &GameConfig) {
        self.x = self.spawn_x;
        if let Some(gap) = self.pending_gap.take() {
            self.gap = gap;
        }
        let shrink = (self.score as f32 / 1.5).floor();
        self.gap_height = (config.initial_gap_height() - shrink).max(config.min_gap_height());
        pacing.speed = config.base_speed * (1.0 + self.score as f32 / 100.0);

        log::trace!(
            "Wall recycled: score={} gap={} gap_height={} speed={}",
            self.score,
            self.gap,
            self.gap_height,
            pacing.speed
        );
    }

    /// Back to the episode start with a fresh gap
    pub fn reset_to_spawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        self.x = self.start_x;
        self.width = config.wall_width;
        self.gap = roll_gap(config, rng);
        self.gap_height = config.initial_gap_height();
        self.pending_gap = None;
        self.score = 0;
    }
}

/// Two walls taking turns in front of the bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub pairs: [ObstaclePair; 2],
    pub pacing: Pacing,
}

impl ObstacleStream {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let leading = ObstaclePair::new(config, false, rng);
        let trailing = ObstaclePair::new(config, true, rng);
        Self {
            pairs: [leading, trailing],
            pacing: Pacing::new(config),
        }
    }

    /// Advance both walls at the shared speed
    pub fn advance<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> [GapPhase; 2] {
        let [a, b] = &mut self.pairs;
        let first = a.advance(&mut self.pacing, config, rng);
        let second = b.advance(&mut self.pacing, config, rng);
        [first, second]
    }

    /// Index of the wall the bird has not cleared yet (ties go to slot 0)
    pub fn current_index(&self) -> usize {
        if self.pairs[1].score < self.pairs[0].score {
            1
        } else {
            0
        }
    }

    pub fn total_score(&self) -> u32 {
        self.pairs.iter().map(|p| p.score).sum()
    }

    pub fn speed(&self) -> f32 {
        self.pacing.speed
    }

    /// Both walls back to spawn, pacing back to baseline
    pub fn reset<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        for pair in &mut self.pairs {
            pair.reset_to_spawn(config, rng);
        }
        self.pacing = Pacing::new(config);
    }
}
