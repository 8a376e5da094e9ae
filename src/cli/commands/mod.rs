pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
