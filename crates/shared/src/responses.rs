//! Response bodies for the engine's HTTP routes.

use serde::{Deserialize, Serialize};
use wayfarer_domain::WorldHistoryEntry;

use crate::SimulationOutcome;

/// Body of `GET /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<WorldHistoryEntry>,
}

/// Body of any route that failed with a plain message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `GET /api/cron/daily-update`.
///
/// Success carries `logs` and `hegemony`; a reported failure carries the
/// simulation's `logs` and `error` untouched; a failure to run the step at
/// all carries only `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hegemony: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CronResponse {
    /// Map a finished simulation step onto the response body.
    pub fn from_outcome(outcome: SimulationOutcome) -> Self {
        if outcome.success {
            Self {
                success: true,
                logs: Some(outcome.logs),
                hegemony: outcome.hegemony,
                error: None,
            }
        } else {
            Self {
                success: false,
                logs: Some(outcome.logs),
                hegemony: None,
                error: outcome.error,
            }
        }
    }

    /// The step could not be run at all.
    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            success: false,
            logs: None,
            hegemony: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_body_omits_error() {
        let body = CronResponse::from_outcome(SimulationOutcome::succeeded(
            vec!["tick".into()],
            Some(json!({"leader": "Aster"})),
        ));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"success": true, "logs": ["tick"], "hegemony": {"leader": "Aster"}})
        );
    }

    #[test]
    fn failure_body_keeps_logs_and_error() {
        let body = CronResponse::from_outcome(SimulationOutcome::failed(
            vec!["loaded 3 nations".into()],
            "territory table locked",
        ));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": false,
                "logs": ["loaded 3 nations"],
                "error": "territory table locked"
            })
        );
    }

    #[test]
    fn aborted_body_has_only_error() {
        let body = CronResponse::aborted("connection refused");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"success": false, "error": "connection refused"})
        );
    }
}
