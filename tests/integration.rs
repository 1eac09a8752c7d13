use flappy_rl::agent::{Action, GapFollowerPolicy, Observation, Policy, RandomPolicy};
use flappy_rl::sim::{GameState, step};
use flappy_rl::{GameConfig, RunConfig, run_episodes};
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn test_same_seed_same_episode() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);
    let mut pa = RandomPolicy::new(1);
    let mut pb = RandomPolicy::new(1);

    for _ in 0..2000 {
        let act_a = pa.act(&Observation::from_state(&a));
        let ra = step(&mut a, act_a);
        let act_b = pb.act(&Observation::from_state(&b));
        let rb = step(&mut b, act_b);
        assert_eq!(ra, rb);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_reset_round_trip() {
    let mut state = GameState::new(31);
    for _ in 0..300 {
        step(&mut state, Action::Flap);
    }

    state.reset();
    let config = state.config;
    assert_eq!(state.frame, 0);
    assert_eq!(state.score, 0);
    assert_eq!(state.current, 0);
    assert_eq!(state.bird.vel, 0.0);
    assert!((state.bird.y - state.bird.spawn_y).abs() <= 0.3 * config.height + 1e-3);
    assert_eq!(state.walls.pairs[0].x, 700.0);
    assert_eq!(state.walls.pairs[1].x, 1075.0);
    assert_eq!(state.walls.speed(), config.base_speed);
    for wall in &state.walls.pairs {
        assert_eq!(wall.score, 0);
        assert_eq!(wall.gap_height, config.initial_gap_height());
        assert!(wall.pending_gap.is_none());
    }
}

#[test]
fn test_recycle_through_step() {
    let mut state = GameState::new(64);
    // Park the bird safely inside the gap of a wall that's about to wrap
    let wall = &mut state.walls.pairs[0];
    wall.x = -wall.width + 1.0;
    wall.pending_gap = Some(300.0);
    wall.score = 10;
    state.walls.pairs[1].score = 10;
    state.bird.y = 250.0;
    state.bird.vel = 0.0;

    let result = step(&mut state, Action::Glide);
    assert!(!result.done);
    let wall = &state.walls.pairs[0];
    assert_eq!(wall.x, wall.spawn_x);
    assert_eq!(wall.gap, 300.0);
    assert_eq!(wall.score, 10);
    assert_eq!(wall.gap_height, 160.0 - 6.0);
    assert!((state.walls.speed() - 3.0 * 1.1).abs() < 1e-5);
}

#[test]
fn test_custom_config_is_used() {
    let config = GameConfig {
        height: 800.0,
        gravity: 0.25,
        ..Default::default()
    };
    let mut state = GameState::with_config(config, 5);
    state.bird.y = 400.0;
    state.bird.vel = 0.0;
    for wall in &mut state.walls.pairs {
        wall.x = 650.0;
    }

    step(&mut state, Action::Glide);
    step(&mut state, Action::Glide);
    assert!((state.bird.vel + 0.5).abs() < 1e-6);
    assert!((state.bird.y - 400.25).abs() < 1e-6);
}

#[test]
fn test_oversized_bird_config_still_scores() {
    // Unsanitized, this bird's trigger sits left of the wrap point
    let config = GameConfig {
        bird_x: 0.0,
        bird_radius: 40.0,
        ..Default::default()
    };
    let mut state = GameState::with_config(config, 17);
    assert!(state.config.gap_trigger_x() > -state.config.wall_width);

    let mut rng = Pcg32::seed_from_u64(17);
    for _ in 0..400 {
        state.walls.advance(&state.config, &mut rng);
    }
    assert!(state.walls.total_score() >= 1);
}

#[test]
fn test_follower_beats_random() {
    let run = RunConfig {
        episodes: 20,
        max_steps_per_episode: Some(5000),
        ..Default::default()
    };

    let mut state = GameState::new(99);
    let mut follower = GapFollowerPolicy;
    let follow = run_episodes(&mut state, &mut follower, &run);

    let mut state = GameState::new(99);
    let mut random = RandomPolicy::new(99);
    let coin = run_episodes(&mut state, &mut random, &run);

    assert_eq!(follow.games, 20);
    assert_eq!(coin.games, 20);
    assert!(follow.mean_score() >= coin.mean_score());
}
