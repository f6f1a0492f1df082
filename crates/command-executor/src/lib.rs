//! Running external programs and locating them on `PATH`

pub mod command_executor;
pub mod tool_info;

#[cfg(test)]
mod command_executor_test;
