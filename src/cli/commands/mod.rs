//! Subcommands of the `tileworld` binary

pub mod run;
pub mod sweep;
