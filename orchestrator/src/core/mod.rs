//! Pure, deterministic orchestration logic. No I/O lives here.

pub mod command;
pub mod registry;
pub mod resolve;
pub mod select;
