use crate::commands::context::{GlobalOptions, FIELD_WIDTH};
use crate::core::{
    config::ViewerConfig,
    error::Result,
    output::{print_field, print_section_header, print_success},
};

/// Print the effective settings; persist them with `save`
pub fn execute_config(options: &GlobalOptions, save: bool) -> Result<()> {
    let mut config = options.resolve_config()?;

    if save {
        let path = config.save()?;
        print_success(&format!("Saved config to {}", path.display()));
    }

    print_config(&config)
}

fn print_config(config: &ViewerConfig) -> Result<()> {
    print_section_header("Configuration");
    print_field("file", ViewerConfig::config_file()?.display(), FIELD_WIDTH);
    print_field("data_source", &config.data_source, FIELD_WIDTH);
    print_field("cache_capacity", config.cache_capacity, FIELD_WIDTH);
    print_field("zoom", config.zoom, FIELD_WIDTH);
    if let Some(updated_at) = config.updated_at {
        print_field("updated_at", updated_at.to_rfc3339(), FIELD_WIDTH);
    }
    println!();
    Ok(())
}
