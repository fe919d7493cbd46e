//! The game session: owns every entity and drives them one frame at a time.

pub mod logic;
pub mod session;
pub mod types;

pub use session::Session;
pub use types::{
    FrameScheduler, InputEvent, Pose, RotationProfile, Runner, RunnerEvent, ScriptedJump,
    SoundEvent, Transition,
};
