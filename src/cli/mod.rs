//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command routing
//! - Help text and verbosity helpers

pub mod args;
pub mod help;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, InputArgs, OutputFormat};
pub use help::{generate_help, get_log_level};
pub use router::{execute_command, render_plan};
