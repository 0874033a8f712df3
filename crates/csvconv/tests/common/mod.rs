//! Shared test utilities for csvconv integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated test execution in a temp directory
//! - Fixture encoders and a scripted detector
//! - `ConfigBuilder` for creating configurations programmatically

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{big5, gbk, FixedDetector, TestHarness};
