//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - World-store access (hosted PostgREST today)
//! - The world-simulation step (external service)

mod error;
mod external;
pub mod query;
mod store;

pub use error::{RepoError, SimulationError};
pub use external::WorldSimulationPort;
pub use query::{CompareOp, Filter, Ordering, SortDirection, TablePatch, TableQuery};
pub use store::TableStore;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockWorldSimulationPort;
#[cfg(test)]
pub use store::MockTableStore;
