//! World simulation use cases.

use std::sync::Arc;

use wayfarer_shared::SimulationOutcome;

use crate::infrastructure::ports::{SimulationError, WorldSimulationPort};

/// Container for simulation use cases.
pub struct SimulationUseCases {
    pub daily_update: Arc<RunDailyUpdate>,
}

impl SimulationUseCases {
    pub fn new(daily_update: Arc<RunDailyUpdate>) -> Self {
        Self { daily_update }
    }
}

/// Runs one step of the external world simulation.
///
/// The step runs on its own task so that a panic inside the adapter is
/// reported as [`SimulationError::Aborted`] instead of tearing down the
/// request.
pub struct RunDailyUpdate {
    simulation: Arc<dyn WorldSimulationPort>,
}

impl RunDailyUpdate {
    pub fn new(simulation: Arc<dyn WorldSimulationPort>) -> Self {
        Self { simulation }
    }

    pub async fn execute(&self) -> Result<SimulationOutcome, SimulationError> {
        tracing::info!("Starting daily world update");

        let simulation = Arc::clone(&self.simulation);
        let joined = tokio::spawn(async move { simulation.run_step().await }).await;

        let result = match joined {
            Ok(result) => result,
            Err(join_err) => Err(SimulationError::Aborted(panic_message(join_err))),
        };

        match &result {
            Ok(outcome) if outcome.success => {
                tracing::info!(log_lines = outcome.logs.len(), "Daily world update completed");
            }
            Ok(outcome) => {
                tracing::warn!(
                    log_lines = outcome.logs.len(),
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "Daily world update reported failure"
                );
            }
            Err(e) => tracing::error!(error = %e, "Daily world update failed"),
        }

        result
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "simulation step panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockWorldSimulationPort;
    use serde_json::json;

    fn use_case(simulation: MockWorldSimulationPort) -> RunDailyUpdate {
        RunDailyUpdate::new(Arc::new(simulation))
    }

    #[tokio::test]
    async fn passes_outcome_through() {
        let mut simulation = MockWorldSimulationPort::new();
        simulation.expect_run_step().times(1).returning(|| {
            Ok(SimulationOutcome::succeeded(
                vec!["tick".into()],
                Some(json!({"Aster": 3})),
            ))
        });

        let outcome = use_case(simulation).execute().await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.logs, vec!["tick"]);
    }

    #[tokio::test]
    async fn reported_failure_is_not_an_error() {
        let mut simulation = MockWorldSimulationPort::new();
        simulation.expect_run_step().returning(|| {
            Ok(SimulationOutcome::failed(
                vec!["loaded 4 nations".into()],
                "border table locked",
            ))
        });

        let outcome = use_case(simulation).execute().await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("border table locked"));
    }

    #[tokio::test]
    async fn panicking_step_becomes_aborted() {
        struct Exploding;

        #[async_trait::async_trait]
        impl WorldSimulationPort for Exploding {
            async fn run_step(&self) -> Result<SimulationOutcome, SimulationError> {
                panic!("hegemony overflow")
            }
        }

        let err = RunDailyUpdate::new(Arc::new(Exploding))
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, SimulationError::Aborted(ref m) if m == "hegemony overflow"));
    }

    #[tokio::test]
    async fn adapter_errors_propagate() {
        let mut simulation = MockWorldSimulationPort::new();
        simulation
            .expect_run_step()
            .returning(|| Err(SimulationError::NotConfigured));

        let err = use_case(simulation).execute().await.unwrap_err();
        assert!(matches!(err, SimulationError::NotConfigured));
    }
}
