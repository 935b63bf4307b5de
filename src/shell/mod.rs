//! External command execution.

pub mod command;

pub use command::{CommandResult, CommandSpec, ProcessRunner, SystemRunner};
