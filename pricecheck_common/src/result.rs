//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `CheckerError`, so functions can simply return `Result<T>`.
use crate::error::CheckerError;

/// Workspace-wide `Result` alias with `CheckerError` as the default error.
pub type Result<T, E = CheckerError> = std::result::Result<T, E>;
