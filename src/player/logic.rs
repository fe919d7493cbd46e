//! Player physics: jump arc, speed drop, animation and blinking.

use super::types::*;
use crate::collision::{Collidable, CollisionBox};
use crate::core::constants::MS_PER_FRAME;
use crate::render::{Canvas, DrawCommand};
use rand::Rng;

impl Player {
    /// Advance animation by `delta` ms. Blinks while waiting.
    pub fn update<R: Rng>(&mut self, delta: f64, rng: &mut R) {
        self.timer += delta;

        if self.status == PlayerStatus::Waiting {
            self.blink(delta, rng);
        }

        if self.timer >= self.ms_per_frame {
            self.current_frame = (self.current_frame + 1) % self.status.frame_count();
            self.timer = 0.0;
        }

        if self.speed_drop && self.on_ground() {
            self.speed_drop = false;
        }
    }

    /// A blink is counted each time the eyes-closed frame shows after the delay.
    fn blink<R: Rng>(&mut self, delta: f64, rng: &mut R) {
        self.waiting_time += delta;
        if self.waiting_time >= self.blink_delay && self.current_frame == 1 {
            self.set_blink_delay(rng);
            self.waiting_time = 0.0;
            self.blink_count += 1;
        }
    }

    /// Frame to draw. The waiting pose holds its open-eyed frame until the blink delay passes.
    pub fn display_frame(&self) -> usize {
        if self.status == PlayerStatus::Waiting && self.waiting_time < self.blink_delay {
            0
        } else {
            self.current_frame
        }
    }

    /// Faster runs launch higher.
    pub fn start_jump(&mut self, speed: f64) {
        if self.jumping {
            return;
        }
        self.set_status(PlayerStatus::Jumping);
        self.jump_velocity = self.config.initial_jump_velocity - speed / 10.0;
        self.jumping = true;
        self.reached_min_height = false;
        self.speed_drop = false;
    }

    /// Cut the ascent short, but only once the minimum height is reached.
    pub fn end_jump(&mut self) {
        if self.reached_min_height && self.jump_velocity < self.config.drop_velocity {
            self.jump_velocity = self.config.drop_velocity;
        }
    }

    /// Integrate the jump over `delta` ms, scaled to 60fps frames.
    pub fn update_jump(&mut self, delta: f64) {
        let frames_elapsed = delta / MS_PER_FRAME;

        if self.speed_drop {
            self.y_pos += (self.jump_velocity * self.config.speed_drop_coefficient * frames_elapsed).round();
        } else {
            self.y_pos += (self.jump_velocity * frames_elapsed).round();
        }
        self.jump_velocity += self.config.gravity * frames_elapsed;

        if self.y_pos < self.min_jump_y || self.speed_drop {
            self.reached_min_height = true;
        }

        if self.y_pos < self.config.max_jump_height || self.speed_drop {
            self.end_jump();
        }

        if self.y_pos > self.ground_y_pos {
            self.reset();
            self.jump_count += 1;
        }
    }

    /// Drop out of a jump fast.
    pub fn set_speed_drop(&mut self) {
        self.speed_drop = true;
        self.jump_velocity = 1.0;
    }

    /// Abort a physics jump in place, for scripted motion to take over.
    pub fn cancel_jump(&mut self) {
        self.jumping = false;
        self.jump_velocity = 0.0;
        self.speed_drop = false;
    }

    /// Back on the ground, running.
    pub fn reset(&mut self) {
        self.y_pos = self.ground_y_pos;
        self.jump_velocity = 0.0;
        self.jumping = false;
        self.set_status(PlayerStatus::Running);
        self.speed_drop = false;
        self.rotation = 0.0;
    }

    /// Reset for a new run starting at `x_pos`.
    pub fn restart(&mut self, x_pos: f64) {
        self.reset();
        self.x_pos = x_pos;
        self.jump_count = 0;
        self.visible = true;
    }

    pub fn crash(&mut self) {
        self.set_status(PlayerStatus::Crashed);
        self.current_frame = 0;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool) {
        if !self.visible {
            return;
        }
        canvas.draw(DrawCommand::Player {
            x: self.x_pos,
            y: self.y_pos,
            status: self.status,
            frame: self.display_frame(),
            rotation: self.rotation,
        });
        if show_hitboxes {
            let origin = self.bounds();
            for hitbox in &RUNNING_BOXES {
                canvas.draw(DrawCommand::Hitbox(hitbox.offset_by(&origin)));
            }
        }
    }
}

impl Collidable for Player {
    fn bounds(&self) -> CollisionBox {
        CollisionBox::new(self.x_pos, self.y_pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn collision_boxes(&self) -> &[CollisionBox] {
        &RUNNING_BOXES
    }
}
