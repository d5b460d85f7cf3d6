//! Voice capture pipeline for Echoboard.
//!
//! Turns spoken (or typed) input into a reviewed task draft and submits it
//! through the view controller's mutation path. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The pipeline state machine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
