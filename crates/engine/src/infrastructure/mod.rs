//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod logging;
pub mod ports;
pub mod rest_store;
pub mod simulation;
