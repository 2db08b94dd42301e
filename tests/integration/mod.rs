//! Integration tests for batch-uploader
//!
//! These tests drive the public API against the scripted in-memory batch API.

pub mod batch_tests;
pub mod config_tests;
pub mod registry_tests;
