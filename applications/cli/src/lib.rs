//! Roster CLI
//!
//! Terminal front-end for the user-registry backend: configuration,
//! view controllers and their text rendering. The `roster` binary wires
//! these to the command line.

pub mod config;
pub mod error;
pub mod views;

pub use config::CliConfig;
pub use error::{CliError, Result};
