//! Echoboard: view-synchronization core for a voice-enabled task tracker.
//!
//! This crate keeps a locally rendered, filtered, paginated view of tasks
//! consistent with a remote task backend while the user edits filters,
//! switches between board and list views, drags tasks between workflow
//! columns, and dictates new tasks through a voice capture flow.
//!
//! # Architecture
//!
//! Echoboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task, query, and pagination types with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote task backend and
//!   the platform speech capability
//! - **Adapters**: Concrete implementations of ports (HTTP client,
//!   in-memory fake backend, scripted speech source)
//!
//! # Modules
//!
//! - [`view`]: Query model, fetch orchestration, task collection, and drag
//!   transition handling
//! - [`voice`]: Voice-capture-to-task pipeline

pub mod view;
pub mod voice;
