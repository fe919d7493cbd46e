//! Configuration, constants and errors shared by the whole crate.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{ConfigSetting, Dimensions, PlayerConfig, RunnerConfig};
pub use error::RunnerError;
