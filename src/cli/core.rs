//! Shell errors, dispatch, and persistence helpers.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::services::ServiceError,
    errors::{LedgerError, StorageError},
    storage::{JsonStorage, StorageBackend},
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures of a single command; reported to the user, never fatal.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Could not save data: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(inner) => CommandError::Ledger(inner),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl ShellContext {
    /// Builds a context from the on-disk config and data file.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(config_manager.data_file(&config));
        Self::with_parts(mode, config, Box::new(storage))
    }

    /// Builds a context around an explicit config and backend, loading the
    /// ledger from that backend.
    pub fn with_parts(
        mode: CliMode,
        config: Config,
        storage: Box<dyn StorageBackend>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        if mode == CliMode::Script {
            colored::control::set_override(false);
        }

        let ledger = storage.load()?;
        tracing::info!(transactions = ledger.count(), ?mode, "shell context ready");

        Ok(ShellContext {
            mode,
            registry,
            ledger,
            storage,
            config,
            theme: ColorfulTheme::default(),
            running: true,
            awaiting_clear: false,
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command, ?args, "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        match self.registry.closest(input) {
            Some(entry) => output::warning(format!(
                "Unknown command `{input}`. Did you mean `{}`? Type `help` for a list of commands.",
                entry.name
            )),
            None => output::warning(format!(
                "Unknown command `{input}`. Type `help` for a list of commands."
            )),
        }
    }

    /// Writes the ledger through the storage backend.
    pub(crate) fn persist(&self) -> CommandResult {
        self.storage.save(&self.ledger)?;
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        tracing::debug!(error = %err, "command failed");
        output::error(err);
        Ok(())
    }

    /// Asks before wiping data. Script mode never prompts.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode != CliMode::Interactive {
            return Ok(false);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit FinBro?")?)
    }

    pub fn prompt(&self) -> String {
        "finbro> ".to_string()
    }
}
