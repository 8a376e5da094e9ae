pub mod args;
pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use self::core::{CliError, CommandError};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
