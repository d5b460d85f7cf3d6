//! Unit tests for the view module.
//!
//! Tests are organised by concern: domain invariants, query assembly, the
//! in-memory backend contract, controller reconciliation, debounce
//! behaviour, and drag-and-drop.

mod support;
