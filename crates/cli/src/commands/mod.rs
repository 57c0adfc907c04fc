//! CLI subcommands.

pub mod shell;
pub mod users;
