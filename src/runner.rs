//! Episode driver
//!
//! Plays a policy against the simulation and keeps score. This is the loop a
//! learning agent trains in: observe, act, step, hand over the transition.

use serde::{Deserialize, Serialize};

use crate::agent::{Observation, Policy, Transition};
use crate::sim::{GameState, step};
use crate::stats::{DEFAULT_PERIOD, TrainingStats};

/// How long to run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Episodes to finish before stopping
    pub episodes: u64,
    /// Cut an episode short after this many steps
    pub max_steps_per_episode: Option<u64>,
    /// Games per reporting period
    pub period_len: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps_per_episode: None,
            period_len: DEFAULT_PERIOD,
        }
    }
}

/// Run `config.episodes` episodes of `policy` on `state`
pub fn run_episodes(
    state: &mut GameState,
    policy: &mut dyn Policy,
    config: &RunConfig,
) -> TrainingStats {
    let mut stats = TrainingStats::new(config.period_len);
    let mut steps: u64 = 0;
    let mut obs = Observation::from_state(state);

    log::info!(
        "Running {} episodes with policy '{}' (seed {})",
        config.episodes,
        policy.name(),
        state.seed
    );

    while stats.games < config.episodes {
        let action = policy.act(&obs);
        let result = step(state, action);
        // The crashing step is not survived
        if !result.done {
            steps += 1;
        }

        let truncated =
            !result.done && config.max_steps_per_episode.is_some_and(|max| steps >= max);
        // A truncated episode keeps the score it reached
        let final_score = if truncated { state.total_score() } else { result.score };
        if truncated {
            log::debug!("Episode truncated after {} steps", steps);
            state.reset();
        }

        let next_obs = Observation::from_state(state);
        policy.observe(&Transition {
            observation: obs,
            action,
            reward: result.reward,
            next_observation: next_obs,
            done: result.done || truncated,
        });
        obs = next_obs;

        if result.done || truncated {
            policy.end_episode(final_score);
            stats.record_episode(final_score, steps);
            steps = 0;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Action, GapFollowerPolicy, GlidePolicy};

    /// Counts what the runner feeds it
    struct Recorder {
        transitions: usize,
        dones: usize,
        episodes: Vec<u32>,
    }

    impl Policy for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn act(&mut self, _obs: &Observation) -> Action {
            Action::Glide
        }

        fn observe(&mut self, transition: &Transition) {
            self.transitions += 1;
            if transition.done {
                self.dones += 1;
                assert_eq!(transition.reward, -1.0);
            }
        }

        fn end_episode(&mut self, score: u32) {
            self.episodes.push(score);
        }
    }

    #[test]
    fn test_glide_crashes_every_episode() {
        let mut state = GameState::new(42);
        let mut policy = GlidePolicy;
        let config = RunConfig {
            episodes: 5,
            ..Default::default()
        };

        let stats = run_episodes(&mut state, &mut policy, &config);
        assert_eq!(stats.games, 5);
        assert_eq!(stats.record, 0);
        assert_eq!(stats.scores.len(), 5);
    }

    #[test]
    fn test_observe_hook_sees_every_step() {
        let mut state = GameState::new(7);
        let mut policy = Recorder {
            transitions: 0,
            dones: 0,
            episodes: Vec::new(),
        };
        let config = RunConfig {
            episodes: 3,
            ..Default::default()
        };

        let stats = run_episodes(&mut state, &mut policy, &config);
        // Every step is observed, but crashing steps are not counted as survived
        assert_eq!(policy.transitions as u64, stats.total_steps + 3);
        assert_eq!(policy.dones, 3);
        assert_eq!(policy.episodes.len(), 3);
    }

    #[test]
    fn test_truncation() {
        let mut state = GameState::new(3);
        let mut policy = GapFollowerPolicy;
        let config = RunConfig {
            episodes: 2,
            max_steps_per_episode: Some(50),
            period_len: 2,
        };

        let stats = run_episodes(&mut state, &mut policy, &config);
        assert_eq!(stats.games, 2);
        assert!(stats.total_steps <= 100);
        assert_eq!(stats.periods.len(), 1);
    }

    #[test]
    fn test_truncated_step_counts_as_survived() {
        // A fresh bird has no velocity, so its first step can never crash
        let mut state = GameState::new(11);
        let mut policy = GlidePolicy;
        let config = RunConfig {
            episodes: 4,
            max_steps_per_episode: Some(1),
            ..Default::default()
        };

        let stats = run_episodes(&mut state, &mut policy, &config);
        assert_eq!(stats.games, 4);
        assert_eq!(stats.total_steps, 4);
    }

    #[test]
    fn test_follower_clears_walls() {
        let mut state = GameState::new(2024);
        let mut policy = GapFollowerPolicy;
        let config = RunConfig {
            episodes: 3,
            max_steps_per_episode: Some(3000),
            ..Default::default()
        };

        let stats = run_episodes(&mut state, &mut policy, &config);
        assert!(stats.record >= 1, "follower never cleared a wall: {:?}", stats.scores);
    }
}
