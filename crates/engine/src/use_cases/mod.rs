//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod history;
pub mod inspect;
pub mod simulation;

pub use history::{HistoryError, HistoryUseCases, ListRecentHistory};
pub use inspect::{Inspect, InspectCommand, Report, RunQuery};
pub use simulation::{RunDailyUpdate, SimulationUseCases};
