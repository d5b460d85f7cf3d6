//! Synchronized task view for Echoboard.
//!
//! This module keeps the locally held page of tasks consistent with the
//! remote backend under four kinds of concurrent perturbation: debounced
//! filter edits, view-mode switches, explicit pagination, and
//! drag-initiated status transitions. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
