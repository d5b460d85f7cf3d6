//! Unit tests for the voice module.

mod pipeline_tests;
mod support;
