//! Tunable game parameters.
//!
//! Every field has a default matching the stock game; a JSON file may override
//! any subset of them, and individual values can be changed on a live runner
//! through [`ConfigSetting`].

use super::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::error::RunnerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Size of the play field in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Jump physics for the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub gravity: f64,
    /// Negative is upward.
    pub initial_jump_velocity: f64,
    /// Upward velocity a released jump is clamped to once the minimum height is reached.
    pub drop_velocity: f64,
    /// Height above the ground a jump always reaches before it can be cut short.
    pub min_jump_height: f64,
    /// Absolute y above which a jump is ended regardless of input.
    pub max_jump_height: f64,
    pub speed_drop_coefficient: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            initial_jump_velocity: -10.0,
            drop_velocity: -5.0,
            min_jump_height: 30.0,
            max_jump_height: 30.0,
            speed_drop_coefficient: 3.0,
        }
    }
}

impl PlayerConfig {
    /// Sets the jump velocity from a positive magnitude. The drop velocity follows at half.
    pub fn set_jump_velocity(&mut self, magnitude: f64) {
        self.initial_jump_velocity = -magnitude;
        self.drop_velocity = -magnitude / 2.0;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub acceleration: f64,
    pub bg_cloud_speed: f64,
    pub bottom_pad: f64,
    /// Warm-up (ms of running time) before obstacles and coins spawn.
    pub clear_time: f64,
    pub cloud_frequency: f64,
    pub coin_frequency: f64,
    pub gameover_clear_time: f64,
    pub gap_coefficient: f64,
    pub invert_fade_duration: f64,
    /// Night mode toggles every time the displayed distance is a multiple of this.
    pub invert_distance: u64,
    pub max_blink_count: u32,
    pub max_clouds: usize,
    pub max_coins: usize,
    pub max_obstacles: usize,
    pub max_obstacle_length: u32,
    pub max_obstacle_duplication: usize,
    pub max_speed: f64,
    pub mobile_speed_coefficient: f64,
    pub speed: f64,
    /// Coins needed to trigger the win sequence.
    pub win_coin_target: u32,
    /// Vertical slack when picking up coins.
    pub coin_vertical_tolerance: f64,
    /// Displayed-distance interval between score achievements.
    pub achievement_distance: u64,
    pub show_hitboxes: bool,
    pub secret_code: String,
    pub secret_code_bonus: u32,
    pub player: PlayerConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.001,
            bg_cloud_speed: 0.2,
            bottom_pad: 10.0,
            clear_time: 3000.0,
            cloud_frequency: 0.5,
            coin_frequency: 0.7,
            gameover_clear_time: 750.0,
            gap_coefficient: 0.6,
            invert_fade_duration: 12000.0,
            invert_distance: 700,
            max_blink_count: 3,
            max_clouds: 6,
            max_coins: 2,
            max_obstacles: 3,
            max_obstacle_length: 3,
            max_obstacle_duplication: 2,
            max_speed: 13.0,
            mobile_speed_coefficient: 1.2,
            speed: 6.0,
            win_coin_target: 2,
            coin_vertical_tolerance: 20.0,
            achievement_distance: 100,
            show_hitboxes: false,
            secret_code: "motherlode".to_string(),
            secret_code_bonus: 100,
            player: PlayerConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load a config file. Missing fields keep their defaults and the drop
    /// velocity is always re-derived from the jump velocity.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let magnitude = -config.player.initial_jump_velocity;
        config.player.set_jump_velocity(magnitude);
        config.validate()?;
        Ok(config)
    }

    /// Physics values that must stay positive for a jump to land.
    pub fn validate(&self) -> Result<(), RunnerError> {
        let checks = [
            ("GRAVITY", self.player.gravity),
            ("INITIAL_JUMP_VELOCITY", -self.player.initial_jump_velocity),
            ("SPEED_DROP_COEFFICIENT", self.player.speed_drop_coefficient),
            ("SPEED", self.speed),
            ("MAX_SPEED", self.max_speed),
        ];
        for (setting, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(RunnerError::InvalidSettingValue {
                    setting: setting.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if self.win_coin_target == 0 {
            return Err(RunnerError::InvalidSettingValue {
                setting: "WIN_COIN_TARGET".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Write a single override into the config.
    pub fn apply(&mut self, setting: ConfigSetting) {
        match setting {
            ConfigSetting::Acceleration(v) => self.acceleration = v,
            ConfigSetting::Gravity(v) => self.player.gravity = v,
            ConfigSetting::MinJumpHeight(v) => self.player.min_jump_height = v,
            ConfigSetting::SpeedDropCoefficient(v) => self.player.speed_drop_coefficient = v,
            ConfigSetting::InitialJumpVelocity(v) => self.player.set_jump_velocity(v),
            ConfigSetting::Speed(v) => self.speed = v,
            ConfigSetting::MaxSpeed(v) => self.max_speed = v,
            ConfigSetting::GapCoefficient(v) => self.gap_coefficient = v,
            ConfigSetting::CloudFrequency(v) => self.cloud_frequency = v,
            ConfigSetting::CoinFrequency(v) => self.coin_frequency = v,
            ConfigSetting::ClearTime(v) => self.clear_time = v,
            ConfigSetting::WinCoinTarget(v) => self.win_coin_target = v,
        }
    }
}

/// A single named override, as typed on the command line (`GRAVITY=0.4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigSetting {
    Acceleration(f64),
    Gravity(f64),
    MinJumpHeight(f64),
    SpeedDropCoefficient(f64),
    /// Positive magnitude; stored negated.
    InitialJumpVelocity(f64),
    Speed(f64),
    MaxSpeed(f64),
    GapCoefficient(f64),
    CloudFrequency(f64),
    CoinFrequency(f64),
    ClearTime(f64),
    WinCoinTarget(u32),
}

impl ConfigSetting {
    pub const NAMES: [&'static str; 12] = [
        "ACCELERATION",
        "GRAVITY",
        "MIN_JUMP_HEIGHT",
        "SPEED_DROP_COEFFICIENT",
        "INITIAL_JUMP_VELOCITY",
        "SPEED",
        "MAX_SPEED",
        "GAP_COEFFICIENT",
        "CLOUD_FREQUENCY",
        "COIN_FREQUENCY",
        "CLEAR_TIME",
        "WIN_COIN_TARGET",
    ];

    /// Parse `NAME=VALUE`. Names are case-insensitive.
    pub fn parse(assignment: &str) -> Result<Self, RunnerError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| RunnerError::MalformedSetting(assignment.to_string()))?;
        let name = name.trim().to_ascii_uppercase();
        let value = value.trim();

        let invalid = || RunnerError::InvalidSettingValue {
            setting: name.clone(),
            value: value.to_string(),
        };
        let number = || {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };
        // Zero or negative physics would leave a jump that never lands
        let positive = || number().and_then(|v| if v > 0.0 { Ok(v) } else { Err(invalid()) });

        let setting = match name.as_str() {
            "ACCELERATION" => Self::Acceleration(number()?),
            "GRAVITY" => Self::Gravity(positive()?),
            "MIN_JUMP_HEIGHT" => Self::MinJumpHeight(number()?),
            "SPEED_DROP_COEFFICIENT" => Self::SpeedDropCoefficient(positive()?),
            "INITIAL_JUMP_VELOCITY" => Self::InitialJumpVelocity(positive()?),
            "SPEED" => Self::Speed(positive()?),
            "MAX_SPEED" => Self::MaxSpeed(positive()?),
            "GAP_COEFFICIENT" => Self::GapCoefficient(number()?),
            "CLOUD_FREQUENCY" => Self::CloudFrequency(number()?),
            "COIN_FREQUENCY" => Self::CoinFrequency(number()?),
            "CLEAR_TIME" => Self::ClearTime(number()?),
            "WIN_COIN_TARGET" => {
                Self::WinCoinTarget(value.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(invalid)?)
            }
            _ => return Err(RunnerError::UnknownSetting(name.clone())),
        };
        Ok(setting)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Acceleration(_) => "ACCELERATION",
            Self::Gravity(_) => "GRAVITY",
            Self::MinJumpHeight(_) => "MIN_JUMP_HEIGHT",
            Self::SpeedDropCoefficient(_) => "SPEED_DROP_COEFFICIENT",
            Self::InitialJumpVelocity(_) => "INITIAL_JUMP_VELOCITY",
            Self::Speed(_) => "SPEED",
            Self::MaxSpeed(_) => "MAX_SPEED",
            Self::GapCoefficient(_) => "GAP_COEFFICIENT",
            Self::CloudFrequency(_) => "CLOUD_FREQUENCY",
            Self::CoinFrequency(_) => "COIN_FREQUENCY",
            Self::ClearTime(_) => "CLEAR_TIME",
            Self::WinCoinTarget(_) => "WIN_COIN_TARGET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let config = RunnerConfig::default();
        assert_eq!(config.speed, 6.0);
        assert_eq!(config.max_speed, 13.0);
        assert_eq!(config.clear_time, 3000.0);
        assert_eq!(config.max_obstacle_duplication, 2);
        assert_eq!(config.player.gravity, 0.6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{"speed": 8.0, "player": {"gravity": 0.4}}"#).unwrap();
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.player.gravity, 0.4);
        assert_eq!(config.player.initial_jump_velocity, -10.0);
        assert_eq!(config.max_clouds, 6);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = RunnerConfig::load(Path::new("/nonexistent/shark-runner.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    fn write_temp(tag: &str, json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "shark-runner-{}-{}.json",
            tag,
            std::process::id()
        ));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_derives_drop_velocity() {
        let path = write_temp("jump", r#"{"player": {"initial_jump_velocity": -12.0}}"#);
        let config = RunnerConfig::load(&path);
        let _ = fs::remove_file(&path);
        let config = config.unwrap();
        assert_eq!(config.player.initial_jump_velocity, -12.0);
        assert_eq!(config.player.drop_velocity, -6.0);
    }

    #[test]
    fn test_load_rejects_zero_gravity() {
        let path = write_temp("gravity", r#"{"player": {"gravity": 0.0}}"#);
        let err = RunnerConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let path = std::env::temp_dir().join(format!("shark-runner-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = RunnerConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    // ── ConfigSetting parsing ──────────────────────────────────────

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            ConfigSetting::parse("gravity=0.4").unwrap(),
            ConfigSetting::Gravity(0.4)
        );
        assert_eq!(
            ConfigSetting::parse(" SPEED = 7 ").unwrap(),
            ConfigSetting::Speed(7.0)
        );
    }

    #[test]
    fn test_parse_rejects_missing_equals() {
        assert_eq!(
            ConfigSetting::parse("GRAVITY"),
            Err(RunnerError::MalformedSetting("GRAVITY".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_name() {
        assert_eq!(
            ConfigSetting::parse("WARP=9"),
            Err(RunnerError::UnknownSetting("WARP".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        assert!(matches!(
            ConfigSetting::parse("SPEED=fast"),
            Err(RunnerError::InvalidSettingValue { .. })
        ));
        assert!(matches!(
            ConfigSetting::parse("WIN_COIN_TARGET=0"),
            Err(RunnerError::InvalidSettingValue { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_positive_physics() {
        for assignment in [
            "GRAVITY=0",
            "GRAVITY=-0.6",
            "INITIAL_JUMP_VELOCITY=0",
            "SPEED_DROP_COEFFICIENT=-1",
            "SPEED=0",
            "MAX_SPEED=-13",
        ] {
            assert!(
                matches!(
                    ConfigSetting::parse(assignment),
                    Err(RunnerError::InvalidSettingValue { .. })
                ),
                "{assignment} should be rejected"
            );
        }
        // Zero is still fine where it cannot stall a jump
        assert_eq!(
            ConfigSetting::parse("ACCELERATION=0").unwrap(),
            ConfigSetting::Acceleration(0.0)
        );
    }

    #[test]
    fn test_every_name_parses() {
        for name in ConfigSetting::NAMES {
            let setting = ConfigSetting::parse(&format!("{name}=3")).unwrap();
            assert_eq!(setting.name(), name);
        }
    }

    #[test]
    fn test_apply_jump_velocity_derives_drop_velocity() {
        let mut config = RunnerConfig::default();
        config.apply(ConfigSetting::InitialJumpVelocity(12.0));
        assert_eq!(config.player.initial_jump_velocity, -12.0);
        assert_eq!(config.player.drop_velocity, -6.0);
    }
}
