//! External service ports.

use async_trait::async_trait;
use wayfarer_shared::SimulationOutcome;

use super::error::SimulationError;

/// The world-simulation step run by the daily cron.
///
/// Its rules live outside this system. A reported failure comes back as an
/// `Ok` outcome with `success == false`; `Err` means the step could not be
/// run or its answer could not be read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorldSimulationPort: Send + Sync {
    async fn run_step(&self) -> Result<SimulationOutcome, SimulationError>;
}
