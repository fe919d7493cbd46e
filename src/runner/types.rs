//! Runner state, inputs, outputs and scripted transitions.

use crate::core::constants::{
    INTRO_END_X_DIVISOR, INTRO_JUMP_FRAMES, INTRO_JUMP_HEIGHT, INTRO_ROTATION,
    INTRO_ROTATION_HOLD, INTRO_START_DEPTH, WIN_JUMP_DISTANCE, WIN_JUMP_FRAMES, WIN_JUMP_HEIGHT,
    WIN_ROTATION,
};
use crate::core::{Dimensions, RunnerConfig};
use crate::horizon::Horizon;
use crate::meters::DigitMeter;
use crate::player::Player;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;

/// Inputs the host feeds in, already decoded from keys, touches or focus changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    /// Speed drop while airborne.
    DropPressed,
    RestartRequested,
    /// Printable key, fed to the secret-code matcher.
    Typed(char),
    FocusLost,
    FocusGained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    ButtonPress,
    Hit,
    Score,
}

/// Side effects published for the host, drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent {
    Sound(SoundEvent),
    CoinCollected { total: u32 },
    Achievement { distance: u64 },
    NightModeChanged { inverted: bool },
    IntroFinished,
    WinSequenceStarted,
    SecretUnlocked { total: u32 },
    GameOver { won: bool, distance: u64, coins: u32 },
    Restarted { play_count: u32 },
}

/// At most one outstanding frame request. `handle` is non-zero while the loop runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameScheduler {
    pending: bool,
    handle: u64,
    next_handle: u64,
}

impl FrameScheduler {
    /// Request the next frame. No-op if one is already pending.
    pub fn schedule(&mut self) {
        if !self.pending {
            self.pending = true;
            self.next_handle += 1;
            self.handle = self.next_handle;
        }
    }

    /// The requested frame is being serviced.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.handle = 0;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.handle != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationProfile {
    /// Hold `angle` until `hold` progress, then unwind to 0 at double rate.
    HoldThenUnwind { angle: f64, hold: f64 },
    /// Level for the first half, then ramp to `angle`.
    SecondHalfRamp { angle: f64 },
}

impl RotationProfile {
    pub fn at(&self, progress: f64) -> f64 {
        match *self {
            Self::HoldThenUnwind { angle, hold } => {
                if progress < hold {
                    angle
                } else {
                    angle * (1.0 - ((progress - hold) * 2.0).min(1.0))
                }
            }
            Self::SecondHalfRamp { angle } => {
                if progress < 0.5 {
                    0.0
                } else {
                    angle * (progress - 0.5) * 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Fixed-length sinusoidal arc: linear in x, `peak * sin(pi * t)` above `start_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedJump {
    pub current_frame: u32,
    pub total_frames: u32,
    pub start_x: f64,
    pub end_x: f64,
    pub start_y: f64,
    pub peak_height: f64,
    pub rotation: RotationProfile,
}

impl ScriptedJump {
    /// Out of the start lake to the running position.
    pub fn intro(start_x: f64, ground_y: f64, world: Dimensions) -> Self {
        Self {
            current_frame: 0,
            total_frames: INTRO_JUMP_FRAMES,
            start_x,
            end_x: world.width / INTRO_END_X_DIVISOR,
            start_y: ground_y + INTRO_START_DEPTH,
            peak_height: INTRO_JUMP_HEIGHT,
            rotation: RotationProfile::HoldThenUnwind {
                angle: INTRO_ROTATION,
                hold: INTRO_ROTATION_HOLD,
            },
        }
    }

    /// Forward dive into the goal lake.
    pub fn win(start_x: f64, start_y: f64) -> Self {
        Self {
            current_frame: 0,
            total_frames: WIN_JUMP_FRAMES,
            start_x,
            end_x: start_x + WIN_JUMP_DISTANCE,
            start_y,
            peak_height: WIN_JUMP_HEIGHT,
            rotation: RotationProfile::SecondHalfRamp {
                angle: WIN_ROTATION,
            },
        }
    }

    /// Pose for the current frame, then advance one frame.
    pub fn step(&mut self) -> Pose {
        let progress = self.current_frame as f64 / self.total_frames as f64;
        self.current_frame += 1;
        Pose {
            x: self.start_x + (self.end_x - self.start_x) * progress,
            y: self.start_y - self.peak_height * (PI * progress).sin(),
            rotation: self.rotation.at(progress),
        }
    }

    /// Every frame through `total_frames` has been shown.
    pub fn is_finished(&self) -> bool {
        self.current_frame > self.total_frames
    }
}

/// Scripted sequence in progress. At most one runs at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    None,
    IntroJump(ScriptedJump),
    /// Won; waiting for the goal lake to finish sliding in.
    LakeReveal,
    /// Horizon frozen; the player walks right to the lake edge.
    MoveToLake { target_x: f64 },
    WinJump(ScriptedJump),
}

impl Transition {
    pub fn is_scripted_jump(&self) -> bool {
        matches!(self, Self::IntroJump(_) | Self::WinJump(_))
    }
}

/// The game session state. Owns every entity; the host only feeds time and
/// input and drains draw commands and events.
pub struct Runner {
    pub config: RunnerConfig,
    pub dimensions: Dimensions,
    pub player: Player,
    pub horizon: Horizon,
    pub distance_meter: DigitMeter,
    pub coin_counter: DigitMeter,

    pub distance_ran: f64,
    pub highest_score: u64,
    pub coin_count: u32,
    pub coins_high_score: u32,
    pub current_speed: f64,
    /// Running time since the game (or restart) began. Gates hazard spawning.
    pub running_time: f64,
    pub play_count: u32,

    pub activated: bool,
    pub playing: bool,
    pub crashed: bool,
    pub paused: bool,
    pub won: bool,
    pub playing_intro: bool,
    pub stop_spawning_obstacles: bool,
    pub disable_controls: bool,

    pub inverted: bool,
    pub(super) invert_timer: f64,
    pub(super) invert_trigger: bool,

    pub transition: Transition,
    /// Timestamp of the last update.
    pub(super) time: Option<f64>,
    pub(super) scheduler: FrameScheduler,
    pub(super) secret_buffer: String,
    pub(super) events: Vec<RunnerEvent>,
    pub(super) rng: StdRng,
}

impl Runner {
    /// A runner waiting for its first jump. `seed` fixes all randomness.
    pub fn new(config: RunnerConfig, dimensions: Dimensions, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let player = Player::new(config.player.clone(), dimensions.height, config.bottom_pad, &mut rng);
        let horizon = Horizon::new(&config, dimensions, &mut rng);
        let distance_meter = DigitMeter::distance(dimensions.width, config.achievement_distance);
        let coin_counter = DigitMeter::coins(dimensions.width);

        let mut runner = Self {
            dimensions,
            player,
            horizon,
            distance_meter,
            coin_counter,
            distance_ran: 0.0,
            highest_score: 0,
            coin_count: 0,
            coins_high_score: 0,
            current_speed: config.speed,
            running_time: 0.0,
            play_count: 0,
            activated: false,
            playing: false,
            crashed: false,
            paused: false,
            won: false,
            playing_intro: false,
            stop_spawning_obstacles: false,
            disable_controls: false,
            inverted: false,
            invert_timer: 0.0,
            invert_trigger: false,
            transition: Transition::None,
            time: None,
            scheduler: FrameScheduler::default(),
            secret_buffer: String::new(),
            events: Vec::new(),
            rng,
            config,
        };
        runner.set_speed(None);
        runner.scheduler.schedule();
        runner
    }

    /// Where the player stands while running.
    pub fn running_x(&self) -> f64 {
        self.dimensions.width / INTRO_END_X_DIVISOR
    }

    /// A frame has been requested and not yet serviced.
    pub fn frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// The loop is live: a frame handle is held.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn drain_events(&mut self) -> Vec<RunnerEvent> {
        std::mem::take(&mut self.events)
    }
}
