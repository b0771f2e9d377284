//! Implementations of the CLI subcommands.

pub mod migrate;
pub mod serve;
