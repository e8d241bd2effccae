use crate::commands::context::{open_session, print_snapshot_summary, GlobalOptions};
use crate::core::error::Result;

/// Render one date and print its summary
pub async fn execute_show(options: &GlobalOptions, date: &str) -> Result<()> {
    let session = open_session(options, Some(date)).await?;
    print_snapshot_summary(&session);
    Ok(())
}
