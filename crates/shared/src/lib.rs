//! Wayfarer Shared - wire types for the engine's HTTP surface
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and the domain records
//! 2. **No business logic** - Pure data types and serialization

pub mod responses;
pub mod simulation;

pub use responses::{CronResponse, ErrorResponse, HistoryResponse};
pub use simulation::SimulationOutcome;
