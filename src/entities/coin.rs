//! Collectible coins. Picking up enough of them starts the win sequence.

use super::{random_between, scroll_increment, Scrolling};
use crate::collision::{Collidable, CollisionBox};
use crate::render::{Canvas, DrawCommand};
use rand::Rng;

pub const COIN_WIDTH: f64 = 20.0;
pub const COIN_HEIGHT: f64 = 20.0;
pub const MIN_COIN_GAP: i64 = 250;
pub const MAX_COIN_GAP: i64 = 1000;
pub const COIN_FRAMES: usize = 4;
pub const COIN_FRAME_MS: f64 = 1000.0 / 6.0;
/// Heights a coin can float at, from ground level up.
pub const COIN_Y_POSITIONS: [f64; 3] = [110.0, 75.0, 50.0];

const COIN_BOXES: [CollisionBox; 1] = [CollisionBox::new(0.0, 0.0, COIN_WIDTH, COIN_HEIGHT)];

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub x_pos: f64,
    pub y_pos: f64,
    pub gap: f64,
    pub remove: bool,
    pub collected: bool,
    pub current_frame: usize,
    timer: f64,
}

impl Coin {
    pub fn new<R: Rng>(container_width: f64, rng: &mut R) -> Self {
        let y_pos = COIN_Y_POSITIONS[rng.gen_range(0..COIN_Y_POSITIONS.len())];
        Self {
            x_pos: container_width,
            y_pos,
            gap: random_between(rng, MIN_COIN_GAP, MAX_COIN_GAP),
            remove: false,
            collected: false,
            current_frame: 0,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, delta: f64, speed: f64) {
        if self.remove {
            return;
        }
        self.x_pos -= scroll_increment(speed, delta);
        if !self.is_visible() {
            self.remove = true;
        }

        self.timer += delta;
        if self.timer >= COIN_FRAME_MS {
            self.current_frame = (self.current_frame + 1) % COIN_FRAMES;
            self.timer = 0.0;
        }
    }

    /// Consume the coin. It stops drawing and is pruned on the next horizon update.
    pub fn collect(&mut self) {
        self.collected = true;
        self.remove = true;
    }

    pub fn is_visible(&self) -> bool {
        self.x_pos + COIN_WIDTH > 0.0
    }
}

impl Collidable for Coin {
    fn bounds(&self) -> CollisionBox {
        CollisionBox::new(self.x_pos, self.y_pos, COIN_WIDTH, COIN_HEIGHT)
    }

    fn collision_boxes(&self) -> &[CollisionBox] {
        &COIN_BOXES
    }
}

impl Scrolling for Coin {
    fn x_pos(&self) -> f64 {
        self.x_pos
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn is_removable(&self) -> bool {
        self.remove
    }

    fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool) {
        if self.collected {
            return;
        }
        canvas.draw(DrawCommand::Coin {
            x: self.x_pos,
            y: self.y_pos,
            frame: self.current_frame,
        });
        if show_hitboxes {
            canvas.draw(DrawCommand::Hitbox(self.bounds()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn coin_at(x: f64) -> Coin {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut coin = Coin::new(600.0, &mut rng);
        coin.x_pos = x;
        coin
    }

    #[test]
    fn test_spawn_position_and_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let coin = Coin::new(600.0, &mut rng);
            assert_eq!(coin.x_pos, 600.0);
            assert!(COIN_Y_POSITIONS.contains(&coin.y_pos));
            assert!((250.0..=1000.0).contains(&coin.gap));
        }
    }

    #[test]
    fn test_moves_by_floored_increment() {
        let mut coin = coin_at(300.0);
        coin.update(16.7, 6.0);
        assert_eq!(coin.x_pos, 294.0);
    }

    #[test]
    fn test_animation_cycles_four_frames() {
        let mut coin = coin_at(300.0);
        for expected in [1, 2, 3, 0] {
            coin.update(COIN_FRAME_MS, 0.0);
            assert_eq!(coin.current_frame, expected);
        }
    }

    #[test]
    fn test_collected_coin_is_not_drawn() {
        let mut coin = coin_at(300.0);
        coin.collect();
        assert!(coin.is_removable());
        let mut canvas: Vec<DrawCommand> = Vec::new();
        coin.draw(&mut canvas, true);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_removed_once_past_left_edge() {
        let mut coin = coin_at(-15.0);
        coin.update(16.7, 6.0);
        assert!(coin.remove);
    }
}
