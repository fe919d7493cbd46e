//! Integration test: player hit tests against real obstacle and coin hitboxes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shark_runner::collision::{check_for_collision, check_pickup, Collidable};
use shark_runner::core::PlayerConfig;
use shark_runner::entities::{Coin, Obstacle, ObstacleKind, OBSTACLE_TYPES};
use shark_runner::player::Player;

fn running_player(rng: &mut ChaCha8Rng) -> Player {
    let mut player = Player::new(PlayerConfig::default(), 150.0, 10.0, rng);
    player.restart(40.0);
    player
}

fn obstacle(kind: ObstacleKind, x: f64, rng: &mut ChaCha8Rng) -> Obstacle {
    let def = OBSTACLE_TYPES
        .iter()
        .find(|t| t.kind == kind)
        .expect("kind in catalog");
    let mut obstacle = Obstacle::new(def, 600.0, 0.6, 6.0, 1, rng);
    obstacle.x_pos = x;
    obstacle
}

#[test]
fn test_running_into_cactus_collides() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let player = running_player(&mut rng);
    let cactus = obstacle(ObstacleKind::SmallCactus, 70.0, &mut rng);

    let (a, b) = check_for_collision(&cactus, &player).expect("collision");
    assert!(a.intersects(&b));
}

#[test]
fn test_running_into_car_collides() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let player = running_player(&mut rng);
    let car = obstacle(ObstacleKind::Car, 60.0, &mut rng);
    assert!(check_for_collision(&car, &player).is_some());
}

#[test]
fn test_jumping_clears_cactus() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut player = running_player(&mut rng);
    player.y_pos = 20.0;
    let cactus = obstacle(ObstacleKind::SmallCactus, 70.0, &mut rng);
    assert!(check_for_collision(&cactus, &player).is_none());
}

#[test]
fn test_distant_obstacle_misses() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let player = running_player(&mut rng);
    let cactus = obstacle(ObstacleKind::SmallCactus, 300.0, &mut rng);
    assert!(check_for_collision(&cactus, &player).is_none());
}

#[test]
fn test_outline_overlap_without_box_overlap_misses() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let player = running_player(&mut rng);
    // Inside the player's outline, left of every player hitbox
    let cactus = obstacle(ObstacleKind::SmallCactus, 30.0, &mut rng);
    assert!(cactus.bounds().intersects(&player.bounds()));
    assert!(check_for_collision(&cactus, &player).is_none());
}

#[test]
fn test_coin_pickup_uses_vertical_tolerance() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let player = running_player(&mut rng);
    let mut coin = Coin::new(600.0, &mut rng);
    coin.x_pos = 60.0;

    coin.y_pos = 110.0;
    assert!(check_pickup(&coin, &player, 20.0));

    coin.y_pos = 50.0;
    assert!(!check_pickup(&coin, &player, 20.0));
    assert!(check_pickup(&coin, &player, 25.0));
}
