//! Stable exit codes for the orchestrator CLI.
//!
//! A failing step propagates the wrapper's own exit code instead of these.

/// Run (or dry run) completed successfully.
pub const OK: i32 = 0;
/// Configuration, resolution, or artifact-validation failure.
pub const INVALID: i32 = 1;
