//! Application state and composition.

use std::sync::Arc;

use crate::entities::History;
use crate::infrastructure::ports::{TableStore, WorldSimulationPort};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    /// Bearer token required on the cron route, when set.
    pub cron_secret: Option<String>,
}

/// Container for all use cases.
pub struct UseCases {
    pub history: use_cases::HistoryUseCases,
    pub simulation: use_cases::SimulationUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        store: Arc<dyn TableStore>,
        simulation: Arc<dyn WorldSimulationPort>,
        cron_secret: Option<String>,
    ) -> Self {
        let history = Arc::new(History::new(store));

        let use_cases = UseCases {
            history: use_cases::HistoryUseCases::new(Arc::new(
                use_cases::ListRecentHistory::new(history),
            )),
            simulation: use_cases::SimulationUseCases::new(Arc::new(
                use_cases::RunDailyUpdate::new(simulation),
            )),
        };

        Self {
            use_cases,
            cron_secret,
        }
    }
}
