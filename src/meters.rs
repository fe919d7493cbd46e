//! Digit readouts for distance and coins, with high scores and the
//! achievement flash.

use crate::core::constants::{
    COIN_COUNTER_Y, DIGIT_DEST_WIDTH, DIGIT_WIDTH, DISTANCE_COEFFICIENT, DISTANCE_METER_Y,
    FLASH_DURATION_MS, FLASH_ITERATIONS, MAX_COIN_UNITS, MAX_DISTANCE_UNITS,
};
use crate::render::{Canvas, DrawCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterKind {
    Distance,
    Coins,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterConfig {
    pub max_units: usize,
    /// Raw value to displayed value.
    pub coefficient: f64,
    /// Displayed-value interval that triggers the flash. `None` disables it.
    pub achievement_distance: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DigitMeter {
    pub kind: MeterKind,
    pub config: MeterConfig,
    pub x: f64,
    pub y: f64,
    /// Zero-padded current value.
    pub digits: String,
    pub high_score: Option<String>,
    /// Flashing after an achievement.
    pub achievement: bool,
    max_score_units: usize,
    max_score: u64,
    flash_timer: f64,
    flash_iterations: u32,
    last_milestone: u64,
    paint: bool,
}

impl DigitMeter {
    pub fn new(kind: MeterKind, config: MeterConfig, container_width: f64, y: f64) -> Self {
        let mut meter = Self {
            kind,
            config,
            x: 0.0,
            y,
            digits: "0".repeat(config.max_units),
            high_score: None,
            achievement: false,
            max_score_units: config.max_units,
            max_score: 10u64.pow(config.max_units as u32) - 1,
            flash_timer: 0.0,
            flash_iterations: 0,
            last_milestone: 0,
            paint: true,
        };
        meter.calc_x_pos(container_width);
        meter
    }

    pub fn distance(container_width: f64, achievement_distance: u64) -> Self {
        Self::new(
            MeterKind::Distance,
            MeterConfig {
                max_units: MAX_DISTANCE_UNITS,
                coefficient: DISTANCE_COEFFICIENT,
                achievement_distance: Some(achievement_distance).filter(|d| *d > 0),
            },
            container_width,
            DISTANCE_METER_Y,
        )
    }

    pub fn coins(container_width: f64) -> Self {
        Self::new(
            MeterKind::Coins,
            MeterConfig {
                max_units: MAX_COIN_UNITS,
                coefficient: 1.0,
                achievement_distance: None,
            },
            container_width,
            COIN_COUNTER_Y,
        )
    }

    /// Right-align against the container edge.
    pub fn calc_x_pos(&mut self, container_width: f64) {
        self.x = container_width - DIGIT_DEST_WIDTH * (self.max_score_units as f64 + 1.0);
    }

    /// Raw value (pixels run, or coins) to the displayed number.
    pub fn actual_distance(&self, raw: f64) -> u64 {
        if raw > 0.0 {
            (raw * self.config.coefficient).round() as u64
        } else {
            0
        }
    }

    /// Refresh the digits from `raw`. Returns true when an achievement was just
    /// reached, which should play the score sound.
    pub fn update(&mut self, delta: f64, raw: f64) -> bool {
        let mut play_sound = false;
        self.paint = true;

        if !self.achievement {
            let value = self.actual_distance(raw);

            // One extra digit once the initial width is exceeded
            if value > self.max_score && self.max_score_units == self.config.max_units {
                self.max_score_units += 1;
                self.max_score = self.max_score * 10 + 9;
            }

            if value > 0 {
                if let Some(step) = self.config.achievement_distance {
                    let milestone = value / step;
                    if milestone > self.last_milestone {
                        self.last_milestone = milestone;
                        self.achievement = true;
                        self.flash_timer = 0.0;
                        play_sound = true;
                    }
                }
                self.digits = self.pad(value);
            } else {
                self.digits = "0".repeat(self.max_score_units);
            }
        } else if self.flash_iterations <= FLASH_ITERATIONS {
            self.flash_timer += delta;
            if self.flash_timer < FLASH_DURATION_MS {
                self.paint = false;
            } else if self.flash_timer > FLASH_DURATION_MS * 2.0 {
                self.flash_timer = 0.0;
                self.flash_iterations += 1;
            }
        } else {
            self.achievement = false;
            self.flash_iterations = 0;
            self.flash_timer = 0.0;
        }

        play_sound
    }

    /// Last `max_score_units` digits, zero-padded.
    fn pad(&self, value: u64) -> String {
        let text = format!("{:0>width$}", value, width = self.max_score_units);
        let skip = text.len().saturating_sub(self.max_score_units);
        text[skip..].to_string()
    }

    pub fn set_high_score(&mut self, raw: f64) {
        let value = self.actual_distance(raw);
        self.high_score = Some(format!("HI {}", self.pad(value)));
    }

    pub fn is_painted(&self) -> bool {
        self.paint
    }

    pub fn reset(&mut self) {
        self.achievement = false;
        self.flash_iterations = 0;
        self.flash_timer = 0.0;
        self.last_milestone = 0;
        self.update(0.0, 0.0);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.paint {
            canvas.draw(DrawCommand::Digits {
                meter: self.kind,
                x: self.x,
                y: self.y,
                text: self.digits.clone(),
                high_score: false,
            });
        }
        if let Some(high_score) = &self.high_score {
            canvas.draw(DrawCommand::Digits {
                meter: self.kind,
                x: self.x - (self.max_score_units as f64 * 2.0) * DIGIT_WIDTH,
                y: self.y,
                text: high_score.clone(),
                high_score: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_meter_layout() {
        let meter = DigitMeter::distance(600.0, 100);
        assert_eq!(meter.digits, "00000");
        assert_eq!(meter.x, 600.0 - 11.0 * 6.0);
    }

    #[test]
    fn test_actual_distance_applies_coefficient() {
        let meter = DigitMeter::distance(600.0, 100);
        assert_eq!(meter.actual_distance(0.0), 0);
        assert_eq!(meter.actual_distance(400.0), 10);
        assert_eq!(meter.actual_distance(420.0), 11);
    }

    #[test]
    fn test_digits_are_zero_padded() {
        let mut meter = DigitMeter::distance(600.0, 100);
        meter.update(16.0, 1000.0);
        assert_eq!(meter.digits, "00025");
    }

    #[test]
    fn test_grows_one_digit_past_max() {
        let mut meter = DigitMeter::distance(600.0, 0);
        meter.update(16.0, 4_000_040.0);
        assert_eq!(meter.digits, "100001");
        meter.update(16.0, 1_000_000_000.0);
        // Only one extra digit is ever added
        assert_eq!(meter.digits.len(), 6);
    }

    #[test]
    fn test_achievement_fires_once_per_milestone() {
        let mut meter = DigitMeter::distance(600.0, 100);
        assert!(!meter.update(16.0, 3960.0)); // 99
        assert!(meter.update(16.0, 4000.0)); // 100
        assert!(meter.achievement);

        // Flash runs its course, then the same milestone does not refire
        for _ in 0..200 {
            assert!(!meter.update(16.0, 4040.0));
        }
        assert!(!meter.achievement);
        assert!(meter.update(16.0, 8000.0)); // 200
    }

    #[test]
    fn test_achievement_fires_when_frame_skips_exact_value() {
        let mut meter = DigitMeter::distance(600.0, 100);
        meter.update(16.0, 3960.0); // 99
        assert!(meter.update(16.0, 4080.0)); // 102
    }

    #[test]
    fn test_flash_hides_digits() {
        let mut meter = DigitMeter::distance(600.0, 100);
        meter.update(16.0, 4000.0);
        meter.update(100.0, 4000.0);
        assert!(!meter.is_painted());
        meter.update(200.0, 4000.0);
        assert!(meter.is_painted());
    }

    #[test]
    fn test_high_score_text() {
        let mut meter = DigitMeter::distance(600.0, 100);
        meter.set_high_score(4000.0);
        assert_eq!(meter.high_score.as_deref(), Some("HI 00100"));
        let mut canvas: Vec<DrawCommand> = Vec::new();
        meter.draw(&mut canvas);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn test_coin_counter_is_unscaled() {
        let mut coins = DigitMeter::coins(600.0);
        assert!(!coins.update(16.0, 3.0));
        assert_eq!(coins.digits, "00003");
        coins.set_high_score(7.0);
        assert_eq!(coins.high_score.as_deref(), Some("HI 00007"));
    }

    #[test]
    fn test_reset_clears_digits_and_milestones() {
        let mut meter = DigitMeter::distance(600.0, 100);
        meter.update(16.0, 4000.0);
        meter.reset();
        assert_eq!(meter.digits, "00000");
        assert!(!meter.achievement);
        assert!(meter.update(16.0, 4000.0));
    }
}
