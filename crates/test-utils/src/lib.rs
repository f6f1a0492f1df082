//! Shared test utilities for the repo-chores workspace

pub mod git_test_utils;
pub mod recording_runner;

// No re-exports - import modules directly
