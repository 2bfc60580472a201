//! CLI module for the `quickrag` binary
//!
//! This module contains all CLI-related functionality including:
//! - Command line argument parsing
//! - Command handlers
//! - Output formatting
//! - The interactive question prompt

pub mod commands;
pub mod handlers;
pub mod output;
pub mod prompt;

pub use commands::*;
pub use handlers::*;
