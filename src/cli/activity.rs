//! Activity log CLI command

use crate::audit::ActivityLogger;
use crate::display::format_activity;
use crate::error::WizardResult;

/// Print the most recent activity entries
pub fn handle_activity_command(logger: &ActivityLogger, limit: usize) -> WizardResult<()> {
    let entries = logger.read_recent(limit)?;
    print!("{}", format_activity(&entries));
    Ok(())
}
