//! Argument surfaces and process plumbing shared by the chore binaries

pub mod cli;
pub mod exit_status;
pub mod telemetry;
