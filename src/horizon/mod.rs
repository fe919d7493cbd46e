//! The scrolling world: ground, night sky and the three entity streams.

pub mod horizon_line;
pub mod night_mode;

pub use horizon_line::{GoalLake, HorizonLine};
pub use night_mode::NightMode;

use crate::core::{Dimensions, RunnerConfig};
use crate::entities::{
    Cloud, Coin, EntityRef, Obstacle, ObstacleKind, ObstacleType, SpawnRule, Stream,
    OBSTACLE_TYPES,
};
use crate::render::Canvas;
use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Horizon {
    pub dimensions: Dimensions,
    pub clouds: Stream<Cloud>,
    pub obstacles: Stream<Obstacle>,
    pub coins: Stream<Coin>,
    /// Most recent first, capped at `max_obstacle_duplication`.
    pub obstacle_history: VecDeque<ObstacleKind>,
    pub horizon_line: HorizonLine,
    pub night_mode: NightMode,
    /// Stops all scrolling. The goal lake still slides in.
    pub frozen: bool,
    gap_coefficient: f64,
    cloud_speed: f64,
    max_obstacle_length: u32,
    max_obstacle_duplication: usize,
}

impl Horizon {
    pub fn new<R: Rng>(config: &RunnerConfig, dimensions: Dimensions, rng: &mut R) -> Self {
        let mut horizon = Self {
            dimensions,
            clouds: Stream::new(SpawnRule {
                max_count: config.max_clouds,
                frequency: config.cloud_frequency,
            }),
            obstacles: Stream::new(SpawnRule {
                max_count: config.max_obstacles,
                frequency: 1.0,
            }),
            coins: Stream::new(SpawnRule {
                max_count: config.max_coins,
                frequency: config.coin_frequency,
            }),
            obstacle_history: VecDeque::new(),
            horizon_line: HorizonLine::new(dimensions.width),
            night_mode: NightMode::new(dimensions.width, rng),
            frozen: false,
            gap_coefficient: config.gap_coefficient,
            cloud_speed: config.bg_cloud_speed,
            max_obstacle_length: config.max_obstacle_length,
            max_obstacle_duplication: config.max_obstacle_duplication,
        };
        horizon.clouds.push(Cloud::new(dimensions.width, rng));
        horizon
    }

    /// Pick up changed pacing values from the config.
    pub fn apply_config(&mut self, config: &RunnerConfig) {
        self.gap_coefficient = config.gap_coefficient;
        self.cloud_speed = config.bg_cloud_speed;
        self.clouds.rule.frequency = config.cloud_frequency;
        self.coins.rule.frequency = config.coin_frequency;
        self.max_obstacle_length = config.max_obstacle_length;
        self.max_obstacle_duplication = config.max_obstacle_duplication;
    }

    /// Advance one tick. `spawn_hazards` gates new obstacles and coins;
    /// existing ones keep moving either way.
    pub fn update<R: Rng>(
        &mut self,
        delta: f64,
        speed: f64,
        spawn_hazards: bool,
        show_night_mode: bool,
        rng: &mut R,
    ) {
        self.horizon_line.update(delta, speed, self.frozen, rng);
        self.night_mode.update(show_night_mode, rng);

        if self.frozen {
            return;
        }

        self.update_clouds(delta, speed, rng);
        self.update_obstacles(delta, speed, spawn_hazards, rng);
        self.update_coins(delta, speed, spawn_hazards, rng);
    }

    fn update_clouds<R: Rng>(&mut self, delta: f64, speed: f64, rng: &mut R) {
        let cloud_speed = self.cloud_speed / 1000.0 * delta * speed;
        for cloud in self.clouds.iter_mut() {
            cloud.update(cloud_speed);
        }
        self.clouds.prune();

        if self.clouds.should_spawn(self.dimensions.width, rng) {
            self.clouds.push(Cloud::new(self.dimensions.width, rng));
        }
    }

    fn update_obstacles<R: Rng>(&mut self, delta: f64, speed: f64, spawn: bool, rng: &mut R) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.update(delta, speed);
        }
        self.obstacles.prune();

        if spawn && self.obstacles.should_spawn(self.dimensions.width, rng) {
            self.add_new_obstacle(speed, rng);
        }
    }

    fn update_coins<R: Rng>(&mut self, delta: f64, speed: f64, spawn: bool, rng: &mut R) {
        for coin in self.coins.iter_mut() {
            coin.update(delta, speed);
        }
        self.coins.prune();

        if spawn && self.coins.should_spawn(self.dimensions.width, rng) {
            let coin = Coin::new(self.dimensions.width, rng);
            debug!(y = coin.y_pos, gap = coin.gap, "coin spawned");
            self.coins.push(coin);
        }
    }

    /// Types allowed at `speed` that would not exceed the repeat cap. Falls back
    /// to the speed filter alone, then to the whole catalog, so a spawn always
    /// has a candidate.
    pub fn eligible_obstacle_types(&self, speed: f64) -> Vec<&'static ObstacleType> {
        let fast_enough: Vec<&'static ObstacleType> =
            OBSTACLE_TYPES.iter().filter(|t| speed >= t.min_speed).collect();
        let fresh: Vec<&'static ObstacleType> = fast_enough
            .iter()
            .copied()
            .filter(|t| !self.duplicate_obstacle_check(t.kind))
            .collect();

        if !fresh.is_empty() {
            fresh
        } else if !fast_enough.is_empty() {
            fast_enough
        } else {
            OBSTACLE_TYPES.iter().collect()
        }
    }

    pub fn add_new_obstacle<R: Rng>(&mut self, speed: f64, rng: &mut R) {
        let candidates = self.eligible_obstacle_types(speed);
        let def = candidates[rng.gen_range(0..candidates.len())];
        let obstacle = Obstacle::new(
            def,
            self.dimensions.width,
            self.gap_coefficient,
            speed,
            self.max_obstacle_length,
            rng,
        );
        debug!(
            kind = def.kind.name(),
            size = obstacle.size,
            gap = obstacle.gap,
            "obstacle spawned"
        );
        self.obstacles.push(obstacle);

        self.obstacle_history.push_front(def.kind);
        self.obstacle_history.truncate(self.max_obstacle_duplication);
    }

    /// True when the last `max_obstacle_duplication` spawns were all `next`.
    pub fn duplicate_obstacle_check(&self, next: ObstacleKind) -> bool {
        let cap = self.max_obstacle_duplication;
        cap > 0
            && self.obstacle_history.len() >= cap
            && self.obstacle_history.iter().take(cap).all(|k| *k == next)
    }

    /// All live entities, back to front: clouds, then coins, then obstacles.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.clouds
            .iter()
            .map(EntityRef::Cloud)
            .chain(self.coins.iter().map(EntityRef::Coin))
            .chain(self.obstacles.iter().map(EntityRef::Obstacle))
    }

    pub fn reset(&mut self) {
        self.clouds.clear();
        self.obstacles.clear();
        self.coins.clear();
        self.obstacle_history.clear();
        self.horizon_line.reset();
        self.night_mode.reset();
        self.frozen = false;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool) {
        self.night_mode.draw(canvas);
        self.horizon_line.draw(canvas);
        for entity in self.entities() {
            entity.draw(canvas, show_hitboxes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn horizon(rng: &mut StdRng) -> Horizon {
        Horizon::new(&RunnerConfig::default(), Dimensions::default(), rng)
    }

    #[test]
    fn test_starts_with_one_cloud() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = horizon(&mut rng);
        assert_eq!(h.clouds.len(), 1);
        assert!(h.obstacles.is_empty());
        assert!(h.coins.is_empty());
    }

    #[test]
    fn test_no_hazards_during_warm_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        for _ in 0..300 {
            h.update(16.7, 6.0, false, false, &mut rng);
        }
        assert!(h.obstacles.is_empty());
        assert!(h.coins.is_empty());
    }

    #[test]
    fn test_first_hazards_spawn_immediately() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        h.update(16.7, 6.0, true, false, &mut rng);
        assert_eq!(h.obstacles.len(), 1);
        assert_eq!(h.coins.len(), 1);
        assert_eq!(h.obstacle_history.len(), 1);
    }

    #[test]
    fn test_history_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        for _ in 0..10 {
            h.add_new_obstacle(6.0, &mut rng);
        }
        assert_eq!(h.obstacle_history.len(), 2);
    }

    #[test]
    fn test_never_three_in_a_row() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut h = horizon(&mut rng);
        let mut kinds = Vec::new();
        for _ in 0..300 {
            h.add_new_obstacle(10.0, &mut rng);
            kinds.push(h.obstacle_history[0]);
        }
        for window in kinds.windows(3) {
            assert!(!(window[0] == window[1] && window[1] == window[2]));
        }
    }

    #[test]
    fn test_birds_wait_for_min_speed() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = horizon(&mut rng);
        let slow = h.eligible_obstacle_types(6.0);
        assert!(slow.iter().all(|t| t.kind != ObstacleKind::Bird));
        let fast = h.eligible_obstacle_types(9.0);
        assert!(fast.iter().any(|t| t.kind == ObstacleKind::Bird));
    }

    #[test]
    fn test_duplicate_check_requires_full_history() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        h.obstacle_history.push_front(ObstacleKind::Car);
        assert!(!h.duplicate_obstacle_check(ObstacleKind::Car));
        h.obstacle_history.push_front(ObstacleKind::Car);
        assert!(h.duplicate_obstacle_check(ObstacleKind::Car));
        assert!(!h.duplicate_obstacle_check(ObstacleKind::SmallCactus));
    }

    #[test]
    fn test_spawned_obstacles_respect_gap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut h = horizon(&mut rng);
        for _ in 0..2000 {
            let count = h.obstacles.len();
            h.update(16.7, 6.0, true, false, &mut rng);
            let len = h.obstacles.len();
            if len > count && len >= 2 {
                let prev = h.obstacles.iter().nth(len - 2).unwrap();
                assert!(600.0 - (prev.x_pos + prev.width) > prev.gap);
            }
        }
    }

    #[test]
    fn test_frozen_horizon_holds_entities() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        h.update(16.7, 6.0, true, false, &mut rng);
        h.frozen = true;
        let xs: Vec<f64> = h.entities().map(|e| e.x_pos()).collect();
        h.update(16.7, 6.0, true, false, &mut rng);
        let after: Vec<f64> = h.entities().map(|e| e.x_pos()).collect();
        assert_eq!(xs, after);
    }

    #[test]
    fn test_reset_empties_streams() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        h.update(16.7, 6.0, true, false, &mut rng);
        h.frozen = true;
        h.reset();
        assert!(h.clouds.is_empty());
        assert!(h.obstacles.is_empty());
        assert!(h.coins.is_empty());
        assert!(h.obstacle_history.is_empty());
        assert!(!h.frozen);
    }

    #[test]
    fn test_draw_puts_ground_before_entities() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut h = horizon(&mut rng);
        h.update(16.7, 6.0, true, false, &mut rng);
        let mut canvas: Vec<DrawCommand> = Vec::new();
        h.draw(&mut canvas, false);
        let strip = canvas
            .iter()
            .position(|c| matches!(c, DrawCommand::HorizonStrip { .. }))
            .unwrap();
        let obstacle = canvas
            .iter()
            .position(|c| matches!(c, DrawCommand::Obstacle { .. }))
            .unwrap();
        assert!(strip < obstacle);
    }
}
