//! Integration test: horizon spawning pacing over long seeded runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shark_runner::core::constants::MS_PER_FRAME;
use shark_runner::core::{Dimensions, RunnerConfig};
use shark_runner::entities::ObstacleKind;
use shark_runner::horizon::Horizon;

const SPEED: f64 = 6.0;

fn horizon(rng: &mut ChaCha8Rng) -> Horizon {
    Horizon::new(&RunnerConfig::default(), Dimensions::default(), rng)
}

#[test]
fn test_warm_up_spawns_only_clouds() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut h = horizon(&mut rng);
    for _ in 0..2_000 {
        h.update(MS_PER_FRAME, SPEED, false, false, &mut rng);
    }
    assert!(h.obstacles.is_empty());
    assert!(h.coins.is_empty());
    assert!(!h.clouds.is_empty());
    assert!(h.clouds.len() <= RunnerConfig::default().max_clouds);
}

#[test]
fn test_obstacle_sequence_respects_caps() {
    let config = RunnerConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut h = horizon(&mut rng);

    let mut spawned: Vec<ObstacleKind> = Vec::new();
    let mut last_back_x: Option<f64> = None;
    for _ in 0..20_000 {
        h.update(MS_PER_FRAME, SPEED, true, false, &mut rng);
        assert!(h.obstacles.len() <= config.max_obstacles);
        assert!(h.coins.len() <= config.max_coins);

        let back_x = h.obstacles.back().map(|o| o.x_pos);
        if let (Some(x), Some(obstacle)) = (back_x, h.obstacles.back()) {
            if last_back_x.map_or(true, |prev| x > prev) {
                spawned.push(obstacle.kind);
            }
        }
        last_back_x = back_x;
    }

    assert!(spawned.len() > 10, "only {} obstacles spawned", spawned.len());
    // Birds need a faster game
    assert!(!spawned.contains(&ObstacleKind::Bird));
    // Never more than the duplication cap of one kind in a row
    for window in spawned.windows(config.max_obstacle_duplication + 1) {
        assert!(
            !window.iter().all(|k| *k == window[0]),
            "repeat run: {:?}",
            window
        );
    }
}

#[test]
fn test_fast_game_admits_birds() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let h = horizon(&mut rng);
    let kinds: Vec<ObstacleKind> = h
        .eligible_obstacle_types(10.0)
        .iter()
        .map(|t| t.kind)
        .collect();
    assert!(kinds.contains(&ObstacleKind::Bird));
    let slow: Vec<ObstacleKind> = h
        .eligible_obstacle_types(SPEED)
        .iter()
        .map(|t| t.kind)
        .collect();
    assert!(!slow.contains(&ObstacleKind::Bird));
}

#[test]
fn test_frozen_horizon_holds_entities_but_finishes_lake_reveal() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut h = horizon(&mut rng);
    for _ in 0..600 {
        h.update(MS_PER_FRAME, SPEED, true, false, &mut rng);
    }
    h.horizon_line.start_goal_lake_reveal();
    h.frozen = true;

    let clouds: Vec<f64> = h.clouds.iter().map(|c| c.x_pos).collect();
    let obstacles: Vec<f64> = h.obstacles.iter().map(|o| o.x_pos).collect();
    let strips = h.horizon_line.x_pos;
    for _ in 0..200 {
        h.update(MS_PER_FRAME, SPEED, true, false, &mut rng);
    }
    assert_eq!(h.clouds.iter().map(|c| c.x_pos).collect::<Vec<_>>(), clouds);
    assert_eq!(h.obstacles.iter().map(|o| o.x_pos).collect::<Vec<_>>(), obstacles);
    assert_eq!(h.horizon_line.x_pos, strips);
    assert!(h.horizon_line.goal_lake.fully_visible);
}

#[test]
fn test_reset_clears_everything() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut h = horizon(&mut rng);
    for _ in 0..600 {
        h.update(MS_PER_FRAME, SPEED, true, true, &mut rng);
    }
    h.frozen = true;
    h.reset();
    assert!(h.obstacles.is_empty());
    assert!(h.coins.is_empty());
    assert!(h.obstacle_history.is_empty());
    assert!(!h.frozen);
    assert_eq!(h.horizon_line.start_lake_x, Some(-40.0));
}
