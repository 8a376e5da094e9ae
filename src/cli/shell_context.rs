use dialoguer::theme::ColorfulTheme;

use crate::{config::Config, ledger::Ledger, storage::StorageBackend};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub storage: Box<dyn StorageBackend>,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
    /// Set after an unconfirmed `clear`; the next line may answer `y`/`n`.
    pub awaiting_clear: bool,
}

