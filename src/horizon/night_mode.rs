//! Moon and stars shown while the palette is inverted.

use crate::render::{Canvas, DrawCommand};
use rand::Rng;

pub const FADE_SPEED: f64 = 0.035;
pub const MOON_WIDTH: f64 = 20.0;
pub const MOON_HEIGHT: f64 = 40.0;
pub const MOON_SPEED: f64 = 0.25;
pub const MOON_Y: f64 = 30.0;
pub const NUM_PHASES: usize = 7;
pub const NUM_STARS: usize = 2;
pub const STAR_SIZE: f64 = 9.0;
pub const STAR_SPEED: f64 = 0.3;
pub const STAR_MAX_Y: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NightMode {
    pub x_pos: f64,
    pub y_pos: f64,
    pub current_phase: usize,
    pub opacity: f64,
    pub stars: [Star; NUM_STARS],
    draw_stars: bool,
    container_width: f64,
}

impl NightMode {
    pub fn new<R: Rng>(container_width: f64, rng: &mut R) -> Self {
        let mut night = Self {
            x_pos: container_width - 50.0,
            y_pos: MOON_Y,
            current_phase: 0,
            opacity: 0.0,
            stars: [Star { x: 0.0, y: 0.0 }; NUM_STARS],
            draw_stars: false,
            container_width,
        };
        night.place_stars(rng);
        night
    }

    /// Fade toward `activated`. Each new night starts on the next moon phase.
    pub fn update<R: Rng>(&mut self, activated: bool, rng: &mut R) {
        if activated {
            if self.opacity == 0.0 {
                self.current_phase = (self.current_phase + 1) % NUM_PHASES;
            }
            self.opacity = (self.opacity + FADE_SPEED).min(1.0);
        } else {
            self.opacity = (self.opacity - FADE_SPEED).max(0.0);
        }

        if self.opacity > 0.0 {
            self.x_pos = self.drift(self.x_pos, MOON_SPEED);
            if self.draw_stars {
                for i in 0..NUM_STARS {
                    self.stars[i].x = self.drift(self.stars[i].x, STAR_SPEED);
                }
            }
        } else {
            self.place_stars(rng);
        }
        self.draw_stars = true;
    }

    /// Move left, wrapping back to the right edge.
    fn drift(&self, x: f64, speed: f64) -> f64 {
        if x < -MOON_WIDTH {
            self.container_width
        } else {
            x - speed
        }
    }

    /// One star per horizontal segment, at a random height.
    fn place_stars<R: Rng>(&mut self, rng: &mut R) {
        let segment = (self.container_width / NUM_STARS as f64).round();
        for (i, star) in self.stars.iter_mut().enumerate() {
            let low = segment * i as f64;
            star.x = rng.gen_range(low..=low + segment);
            star.y = rng.gen_range(0.0..=STAR_MAX_Y);
        }
    }

    pub fn reset(&mut self) {
        self.current_phase = 0;
        self.opacity = 0.0;
        self.draw_stars = false;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.opacity <= 0.0 {
            return;
        }
        if self.draw_stars {
            for star in &self.stars {
                canvas.draw(DrawCommand::Star {
                    x: star.x,
                    y: star.y,
                    opacity: self.opacity,
                });
            }
        }
        canvas.draw(DrawCommand::Moon {
            x: self.x_pos,
            y: self.y_pos,
            phase: self.current_phase,
            opacity: self.opacity,
        });
    }
}
