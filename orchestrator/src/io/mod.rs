//! Side-effecting operations: config, process execution, logs, validation.

pub mod config;
pub mod env;
pub mod executor;
pub mod logs;
pub mod process;
pub mod validate;
