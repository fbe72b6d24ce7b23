//! Result shape of one world-simulation step.

use serde::{Deserialize, Serialize};

/// What the simulation step reports back.
///
/// `hegemony` is opaque to the engine: it is passed through to the cron
/// caller exactly as the simulation produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub success: bool,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hegemony: Option<serde_json::Value>,
}

impl SimulationOutcome {
    pub fn succeeded(logs: Vec<String>, hegemony: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            logs,
            error: None,
            hegemony,
        }
    }

    pub fn failed(logs: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            logs,
            error: Some(error.into()),
            hegemony: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_minimal_failure() {
        let outcome: SimulationOutcome =
            serde_json::from_value(json!({"success": false, "error": "no nations"})).unwrap();
        assert!(!outcome.success);
        assert!(outcome.logs.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("no nations"));
    }
}
