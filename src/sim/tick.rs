//! Discrete simulation step
//!
//! One call advances the world by exactly one frame: apply the agent's
//! action, move everything, resolve collisions, score the step and restart
//! the episode when the bird crashes.

use super::collision::detect_collision;
use super::state::{GameState, StepResult};
use crate::agent::Action;
use crate::consts::PASS_REWARD;

/// Reward for a crash
pub const CRASH_REWARD: f32 = -1.0;

/// Shaping reward: glide while at or above the gap, flap while below it
pub fn positional_reward(bird_y: f32, gap: f32, action: Action) -> f32 {
    let wants_flap = bird_y > gap;
    if action.is_flap() == wants_flap { 1.0 } else { -1.0 }
}

/// Advance the game by one step
pub fn step(state: &mut GameState, action: Action) -> StepResult {
    state.frame += 1;
    state.score = state.total_score();
    let score_before = state.score;

    state.advance(action.is_flap());
    state.current = state.walls.current_index();

    let crashed = detect_collision(&state.bird, &state.walls.pairs, &state.config);

    let mut reward = positional_reward(state.bird.y, state.current_wall().gap, action);
    if state.total_score() > score_before {
        reward = PASS_REWARD;
    }
    if crashed {
        reward = CRASH_REWARD;
        log::debug!(
            "Episode {} over at frame {} with score {}",
            state.episodes,
            state.frame,
            score_before
        );
        state.episodes += 1;
        state.reset();
    }

    StepResult {
        reward,
        done: crashed,
        score: score_before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GapPhase;

    /// Park both walls far away so only the bird matters
    fn open_sky(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        for wall in &mut state.walls.pairs {
            wall.x = 600.0;
        }
        state
    }

    #[test]
    fn test_frame_counter() {
        let mut state = open_sky(1);
        step(&mut state, Action::Glide);
        step(&mut state, Action::Glide);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_glide_at_gap_center() {
        let mut state = open_sky(10);
        let gap = state.walls.pairs[0].gap;
        state.bird.y = gap;
        state.bird.vel = 0.0;

        let result = step(&mut state, Action::Glide);
        assert_eq!(result.reward, 1.0);
        assert!(!result.done);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_flap_above_gap_penalized() {
        let mut state = open_sky(11);
        state.bird.y = state.walls.pairs[0].gap - 50.0;
        let result = step(&mut state, Action::Flap);
        assert_eq!(result.reward, -1.0);
    }

    #[test]
    fn test_flap_below_gap_rewarded() {
        let mut state = open_sky(12);
        state.bird.y = state.walls.pairs[0].gap + 50.0;
        let result = step(&mut state, Action::Flap);
        assert_eq!(result.reward, 1.0);

        let mut state = open_sky(12);
        state.bird.y = state.walls.pairs[0].gap + 50.0;
        let result = step(&mut state, Action::Glide);
        assert_eq!(result.reward, -1.0);
    }

    #[test]
    fn test_crash_above_ceiling_resets() {
        let mut state = open_sky(13);
        for _ in 0..5 {
            step(&mut state, Action::Glide);
        }
        state.bird.y = -1.0;
        state.bird.vel = 0.0;

        let result = step(&mut state, Action::Glide);
        assert!(result.done);
        assert_eq!(result.reward, CRASH_REWARD);
        assert_eq!(state.frame, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.vel, 0.0);
        assert_eq!(state.walls.pairs[0].x, 700.0);
        assert_eq!(state.walls.pairs[1].x, 1075.0);
        assert_eq!(state.walls.speed(), state.config.base_speed);
        assert_eq!(state.episodes, 1);
    }

    #[test]
    fn test_clearing_wall_pays_bonus() {
        let mut state = GameState::new(14);
        let trigger = state.config.gap_trigger_x();
        let wall = &mut state.walls.pairs[0];
        wall.x = trigger + 1.0;
        wall.gap = 250.0;
        state.bird.y = 250.0;
        state.bird.vel = 0.0;

        let result = step(&mut state, Action::Flap);
        assert!(!result.done);
        assert_eq!(result.reward, PASS_REWARD);
        assert_eq!(result.score, 0);
        assert_eq!(state.total_score(), 1);
        // Slot 0 is cleared, slot 1 is now the one to watch
        assert_eq!(state.current, 1);
        assert_eq!(state.wall_phases[0], GapPhase::GapPending);

        let result = step(&mut state, Action::Glide);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_crash_overrides_bonus() {
        let mut state = GameState::new(15);
        let trigger = state.config.gap_trigger_x();
        let wall = &mut state.walls.pairs[0];
        wall.x = trigger + 1.0;
        wall.gap = 250.0;
        // Grazing the top corner of the wall's trailing edge
        state.bird.y = 175.0;
        state.bird.vel = 0.0;

        let result = step(&mut state, Action::Glide);
        assert!(result.done);
        assert_eq!(result.reward, CRASH_REWARD);
        // Reported score is from before the step; the reset wiped the rest
        assert_eq!(result.score, 0);
        assert_eq!(state.total_score(), 0);
    }

    #[test]
    fn test_positional_reward_table() {
        assert_eq!(positional_reward(100.0, 100.0, Action::Glide), 1.0);
        assert_eq!(positional_reward(100.0, 100.0, Action::Flap), -1.0);
        assert_eq!(positional_reward(101.0, 100.0, Action::Flap), 1.0);
        assert_eq!(positional_reward(101.0, 100.0, Action::Glide), -1.0);
    }
}
