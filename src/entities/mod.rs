//! Horizon entities: clouds, coins and obstacles.
//!
//! The set of entity kinds is closed. Each kind lives in its own [`Stream`],
//! a spawn-ordered queue that owns the gap-based pacing and the pruning of
//! removed entities. [`EntityRef`] tags a borrowed entity with its kind when
//! the horizon needs to walk all of them at once.

pub mod cloud;
pub mod coin;
pub mod obstacle;

pub use cloud::Cloud;
pub use coin::Coin;
pub use obstacle::{Obstacle, ObstacleKind, ObstacleType, OBSTACLE_TYPES};

use crate::core::constants::FPS;
use crate::render::Canvas;
use rand::Rng;
use std::collections::VecDeque;

/// Pixels scrolled in one update at `speed` over `delta_ms`.
pub fn scroll_increment(speed: f64, delta_ms: f64) -> f64 {
    (speed * FPS / 1000.0 * delta_ms).floor()
}

/// Uniform integer in `[min, max]`, as f64.
pub fn random_between<R: Rng>(rng: &mut R, min: i64, max: i64) -> f64 {
    if max <= min {
        return min as f64;
    }
    rng.gen_range(min..=max) as f64
}

/// Shared capability set of everything the horizon scrolls.
pub trait Scrolling {
    fn x_pos(&self) -> f64;
    /// Distance that must open up behind this entity before the next one spawns.
    fn gap(&self) -> f64;
    fn is_removable(&self) -> bool;
    fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool);

    /// Position the spawn gap is measured from.
    fn spawn_anchor(&self) -> f64 {
        self.x_pos()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Cloud,
    Coin,
    Obstacle,
}

/// A borrowed entity tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Cloud(&'a Cloud),
    Coin(&'a Coin),
    Obstacle(&'a Obstacle),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Cloud(_) => EntityKind::Cloud,
            Self::Coin(_) => EntityKind::Coin,
            Self::Obstacle(_) => EntityKind::Obstacle,
        }
    }

    pub fn x_pos(&self) -> f64 {
        match self {
            Self::Cloud(c) => c.x_pos(),
            Self::Coin(c) => c.x_pos(),
            Self::Obstacle(o) => o.x_pos(),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool) {
        match self {
            Self::Cloud(c) => c.draw(canvas, show_hitboxes),
            Self::Coin(c) => c.draw(canvas, show_hitboxes),
            Self::Obstacle(o) => o.draw(canvas, show_hitboxes),
        }
    }
}

/// Pacing parameters for one stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    pub max_count: usize,
    /// Chance, per eligible tick, that a new entity is added.
    pub frequency: f64,
}

/// Spawn-ordered queue of one entity kind. Front is the oldest (leftmost).
#[derive(Debug, Clone)]
pub struct Stream<T> {
    items: VecDeque<T>,
    pub rule: SpawnRule,
}

impl<T: Scrolling> Stream<T> {
    pub fn new(rule: SpawnRule) -> Self {
        Self {
            items: VecDeque::new(),
            rule,
        }
    }

    /// An empty stream always spawns. Otherwise the stream must be under its
    /// cap, the newest entity must have cleared its gap, and the frequency
    /// roll must pass.
    pub fn should_spawn<R: Rng>(&self, container_width: f64, rng: &mut R) -> bool {
        match self.items.back() {
            None => true,
            Some(last) => {
                self.items.len() < self.rule.max_count
                    && container_width - last.spawn_anchor() > last.gap()
                    && self.rule.frequency > rng.gen::<f64>()
            }
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Drop removable entities. They normally leave from the front; a coin
    /// collected mid-stream is swept by the fallback pass.
    pub fn prune(&mut self) {
        while self.items.front().is_some_and(|e| e.is_removable()) {
            self.items.pop_front();
        }
        if self.items.iter().any(|e| e.is_removable()) {
            self.items.retain(|e| !e.is_removable());
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}
