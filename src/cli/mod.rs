//! CLI command handlers for Softkey.
//!
//! Each subcommand drives the keyboard controller headlessly, so its
//! behavior can be scripted and checked in tests.

pub mod common;
pub mod config;
#[cfg(feature = "terminal")]
pub mod interactive;
pub mod keys;
pub mod type_cmd;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
#[cfg(feature = "terminal")]
pub use interactive::InteractiveArgs;
pub use keys::KeysArgs;
pub use type_cmd::TypeArgs;
