use crate::commands::context::GlobalOptions;
use crate::core::{
    error::Result,
    output::{print_field, print_section_header},
    session::load_manifest,
    timeline::Timeline,
};
use colored::*;

/// List every date the manifest has data for
pub async fn execute_dates(options: &GlobalOptions) -> Result<()> {
    let config = options.resolve_config()?;
    let fetcher = config.data_source().into_fetcher();
    let manifest = load_manifest(&fetcher).await?;
    let timeline = Timeline::new(manifest.dates)?;

    print_section_header("Available dates");
    for (index, key) in timeline.dates().iter().enumerate() {
        println!(
            "  {} {}",
            format!("{:>4}", index + 1).bright_black(),
            key.to_date_string().white()
        );
    }

    let (first, last) = timeline.bounds();
    println!();
    print_field("total", timeline.len(), 8);
    print_field("range", format!("{first} to {last}"), 8);
    println!();
    Ok(())
}
