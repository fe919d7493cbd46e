//! Background clouds. Decorative, never collide.

use super::{random_between, Scrolling};
use crate::render::{Canvas, DrawCommand};
use rand::Rng;

pub const CLOUD_WIDTH: f64 = 46.0;
pub const CLOUD_HEIGHT: f64 = 14.0;
pub const MIN_CLOUD_GAP: i64 = 100;
pub const MAX_CLOUD_GAP: i64 = 400;
/// Highest a cloud can sit (smallest y).
pub const MAX_SKY_LEVEL: i64 = 30;
pub const MIN_SKY_LEVEL: i64 = 71;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x_pos: f64,
    pub y_pos: f64,
    pub gap: f64,
    pub remove: bool,
}

impl Cloud {
    /// A cloud entering at the right edge, at a random height with a random trailing gap.
    pub fn new<R: Rng>(container_width: f64, rng: &mut R) -> Self {
        Self {
            x_pos: container_width,
            y_pos: random_between(rng, MAX_SKY_LEVEL, MIN_SKY_LEVEL),
            gap: random_between(rng, MIN_CLOUD_GAP, MAX_CLOUD_GAP),
            remove: false,
        }
    }

    /// Drift left by `speed` pixels, rounded up.
    pub fn update(&mut self, speed: f64) {
        if self.remove {
            return;
        }
        self.x_pos -= speed.ceil();
        if !self.is_visible() {
            self.remove = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.x_pos + CLOUD_WIDTH > 0.0
    }
}

impl Scrolling for Cloud {
    fn x_pos(&self) -> f64 {
        self.x_pos
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn is_removable(&self) -> bool {
        self.remove
    }

    fn draw(&self, canvas: &mut dyn Canvas, _show_hitboxes: bool) {
        canvas.draw(DrawCommand::Cloud {
            x: self.x_pos,
            y: self.y_pos,
        });
    }
}
