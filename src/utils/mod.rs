//! Shared utilities.
//!
//! Initialization helpers and retry policy used by the role wait.

pub mod bootstrap;
pub mod retry;
