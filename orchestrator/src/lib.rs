//! Sequential pipeline orchestrator for external agent wrappers.
//!
//! Sequences a fixed pipeline of content-generation stages (constitution →
//! specify → plan → tasks → implement) across per-agent wrapper executables,
//! one per step. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (step registries, selection,
//!   wrapper resolution, command construction). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (config loading, child process
//!   execution with teed output, log allocation, artifact validation).
//!   Isolated behind traits to enable mocking in tests.
//!
//! The [`run`] module coordinates core logic with I/O to implement a single
//! fail-fast invocation over the selected steps.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod request;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
