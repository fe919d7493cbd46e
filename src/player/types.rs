//! Player character data: status, animation table, hitboxes.

use crate::collision::CollisionBox;
use crate::core::PlayerConfig;
use rand::Rng;

/// Sprite is 400x250 drawn at 0.2 scale.
pub const PLAYER_WIDTH: f64 = 80.0;
pub const PLAYER_HEIGHT: f64 = 50.0;
pub const BLINK_TIMING_MS: f64 = 7000.0;

pub const RUNNING_BOXES: [CollisionBox; 4] = [
    CollisionBox::new(42.0, 9.0, 5.0, 16.0),
    CollisionBox::new(25.0, 20.0, 40.0, 10.0),
    CollisionBox::new(30.0, 30.0, 30.0, 6.0),
    CollisionBox::new(17.0, 15.0, 6.0, 20.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Waiting,
    Running,
    Jumping,
    Crashed,
    /// Scripted leap out of the start lake.
    IntroJump,
    /// Scripted leap into the goal lake.
    WinJump,
    InLake,
}

impl PlayerStatus {
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Waiting => 2,
            Self::Running | Self::Crashed => 3,
            _ => 1,
        }
    }

    pub fn ms_per_frame(&self) -> f64 {
        match self {
            Self::Waiting => 1000.0 / 3.0,
            Self::Running => 1000.0 / 12.0,
            _ => 1000.0 / 60.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Jumping => "jumping",
            Self::Crashed => "crashed",
            Self::IntroJump => "intro jump",
            Self::WinJump => "win jump",
            Self::InLake => "in lake",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub config: PlayerConfig,
    pub x_pos: f64,
    pub y_pos: f64,
    pub ground_y_pos: f64,
    /// Absolute y a jump must rise above before it can be cut short.
    pub min_jump_y: f64,
    pub status: PlayerStatus,
    pub current_frame: usize,
    pub(super) timer: f64,
    pub(super) ms_per_frame: f64,

    pub blink_delay: f64,
    pub blink_count: u32,
    /// Time in the waiting pose since the last blink.
    pub(super) waiting_time: f64,

    pub jumping: bool,
    /// Negative is upward.
    pub jump_velocity: f64,
    pub reached_min_height: bool,
    pub speed_drop: bool,
    /// Completed jumps since the last restart. The first one starts the intro.
    pub jump_count: u32,

    /// Degrees, clockwise.
    pub rotation: f64,
    pub visible: bool,
}

impl Player {
    /// Hidden in the start lake, waiting.
    pub fn new<R: Rng>(config: PlayerConfig, world_height: f64, bottom_pad: f64, rng: &mut R) -> Self {
        let ground_y_pos = world_height - PLAYER_HEIGHT - bottom_pad;
        let mut player = Self {
            min_jump_y: ground_y_pos - config.min_jump_height,
            config,
            x_pos: 0.0,
            y_pos: ground_y_pos,
            ground_y_pos,
            status: PlayerStatus::Waiting,
            current_frame: 0,
            timer: 0.0,
            ms_per_frame: PlayerStatus::Waiting.ms_per_frame(),
            blink_delay: 0.0,
            blink_count: 0,
            waiting_time: 0.0,
            jumping: false,
            jump_velocity: 0.0,
            reached_min_height: false,
            speed_drop: false,
            jump_count: 0,
            rotation: 0.0,
            visible: false,
        };
        player.enter_waiting(rng);
        player
    }

    /// Swap in new jump physics and re-derive the cached minimum jump y.
    pub fn apply_config(&mut self, config: &PlayerConfig) {
        self.config = config.clone();
        self.min_jump_y = self.ground_y_pos - self.config.min_jump_height;
    }

    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
        self.current_frame = 0;
        self.ms_per_frame = status.ms_per_frame();
    }

    pub fn enter_waiting<R: Rng>(&mut self, rng: &mut R) {
        self.set_status(PlayerStatus::Waiting);
        self.waiting_time = 0.0;
        self.set_blink_delay(rng);
    }

    pub(super) fn set_blink_delay<R: Rng>(&mut self, rng: &mut R) {
        self.blink_delay = (rng.gen::<f64>() * BLINK_TIMING_MS).ceil();
    }

    pub fn on_ground(&self) -> bool {
        self.y_pos == self.ground_y_pos
    }
}
