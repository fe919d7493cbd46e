//! Owner of the single runner instance a host process may launch.

use super::types::Runner;
use crate::core::{Dimensions, RunnerConfig, RunnerError};
use tracing::{info, warn};

/// Holds at most one runner. A second launch is refused rather than replacing
/// the live game.
#[derive(Default)]
pub struct Session {
    runner: Option<Runner>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch(
        &mut self,
        config: RunnerConfig,
        dimensions: Dimensions,
        seed: Option<u64>,
    ) -> Result<&mut Runner, RunnerError> {
        if self.runner.is_some() {
            warn!("runner already launched");
            return Err(RunnerError::AlreadyLaunched);
        }
        info!(
            width = dimensions.width,
            height = dimensions.height,
            seeded = seed.is_some(),
            "launching runner"
        );
        Ok(self.runner.insert(Runner::new(config, dimensions, seed)))
    }

    pub fn runner(&self) -> Option<&Runner> {
        self.runner.as_ref()
    }

    pub fn runner_mut(&mut self) -> Option<&mut Runner> {
        self.runner.as_mut()
    }
}
