//! Command-line interface.
//!
//! Two subcommands: `serve` runs the HTTP server, `migrate` manages
//! the database schema.

pub mod args;

pub use args::{Cli, Commands};
