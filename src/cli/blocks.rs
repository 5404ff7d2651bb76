//! Block explorer CLI command

use crate::display::format_block_page;
use crate::error::{WizardError, WizardResult};
use crate::services::BlockExplorer;

/// Print one page of recent blocks
pub async fn handle_blocks_command(explorer: &BlockExplorer, page: u64) -> WizardResult<()> {
    let page = explorer
        .fetch_page(page)
        .await
        .map_err(|err| WizardError::Read(format!("Error fetching blocks: {}", err)))?;

    print!("{}", format_block_page(&page));
    Ok(())
}
