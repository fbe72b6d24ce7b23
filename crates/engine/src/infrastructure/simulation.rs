//! World-simulation adapters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use wayfarer_shared::SimulationOutcome;

use crate::infrastructure::config::ConfigError;
use crate::infrastructure::ports::{SimulationError, WorldSimulationPort};

/// Simulation steps can touch every nation; give them room.
const SIMULATION_TIMEOUT_SECS: u64 = 300;

/// Runs the simulation step on an external service.
///
/// The service answers with the outcome body whether or not the step
/// succeeded, so a non-2xx response is still decoded as an outcome when it
/// has that shape.
#[derive(Clone)]
pub struct HttpWorldSimulation {
    client: Client,
    endpoint: Url,
}

impl HttpWorldSimulation {
    /// Fails if the HTTP client cannot be built with the step timeout.
    pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
        Self::with_timeout(endpoint, Duration::from_secs(SIMULATION_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                var: "http client",
                message: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl WorldSimulationPort for HttpWorldSimulation {
    async fn run_step(&self) -> Result<SimulationOutcome, SimulationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| SimulationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SimulationError::RequestFailed(e.to_string()))?;

        match serde_json::from_str::<SimulationOutcome>(&text) {
            Ok(outcome) => Ok(outcome),
            Err(_) if !status.is_success() => Err(SimulationError::RequestFailed(format!(
                "{}: {}",
                status.as_u16(),
                text.trim()
            ))),
            Err(e) => Err(SimulationError::InvalidResponse(e.to_string())),
        }
    }
}

/// Stand-in used when no simulation endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSimulation;

#[async_trait]
impl WorldSimulationPort for UnconfiguredSimulation {
    async fn run_step(&self) -> Result<SimulationOutcome, SimulationError> {
        Err(SimulationError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn simulation_answering(template: ResponseTemplate) -> (MockServer, HttpWorldSimulation) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(template)
            .mount(&server)
            .await;
        let endpoint = Url::parse(&server.uri()).unwrap();
        (server, HttpWorldSimulation::new(endpoint).unwrap())
    }

    #[tokio::test]
    async fn decodes_successful_step() {
        let (_server, simulation) = simulation_answering(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "logs": ["Aster annexed Varn"],
                "hegemony": {"Aster": 0.61}
            })),
        )
        .await;

        let outcome = simulation.run_step().await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.logs, vec!["Aster annexed Varn"]);
        assert_eq!(outcome.hegemony, Some(json!({"Aster": 0.61})));
    }

    #[tokio::test]
    async fn reported_failure_on_error_status_is_still_an_outcome() {
        let (_server, simulation) = simulation_answering(
            ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "logs": ["started"],
                "error": "nations table empty"
            })),
        )
        .await;

        let outcome = simulation.run_step().await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("nations table empty"));
    }

    #[tokio::test]
    async fn unreadable_error_status_is_request_failure() {
        let (_server, simulation) =
            simulation_answering(ResponseTemplate::new(503).set_body_string("maintenance")).await;

        let err = simulation.run_step().await.unwrap_err();
        assert!(matches!(err, SimulationError::RequestFailed(ref m) if m == "503: maintenance"));
    }

    #[tokio::test]
    async fn slow_step_fails_at_the_configured_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "logs": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let endpoint = Url::parse(&server.uri()).unwrap();
        let simulation =
            HttpWorldSimulation::with_timeout(endpoint, Duration::from_millis(50)).unwrap();

        let err = simulation.run_step().await.unwrap_err();
        assert!(matches!(err, SimulationError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn unconfigured_simulation_fails_clearly() {
        let err = UnconfiguredSimulation.run_step().await.unwrap_err();
        assert!(matches!(err, SimulationError::NotConfigured));
    }
}
