use crate::commands::context::{load_session, open_session, print_snapshot_summary, GlobalOptions};
use crate::core::{error::Result, timeline::Direction};

/// Move through the timeline from `from` (or the latest date)
pub async fn execute_step(options: &GlobalOptions, direction: &str, from: Option<&str>) -> Result<()> {
    let direction: Direction = direction.parse()?;
    let mut session = match from {
        Some(from) => open_session(options, Some(from)).await?,
        None => load_session(options).await?,
    };
    let target = session.navigate(direction).await?;
    log::debug!("Stepped {direction} to {target}");
    print_snapshot_summary(&session);
    Ok(())
}
