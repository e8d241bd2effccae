use crate::commands::context::{open_session, CliSession, GlobalOptions};
use crate::core::{
    colors::get_side_color_style,
    date_key::date_input_value,
    error::Result,
    output::{print_info, print_section_header},
};
use colored::*;

/// List the unit markers whose name matches `query`
pub async fn execute_search(options: &GlobalOptions, query: &str, date: Option<&str>) -> Result<()> {
    let mut session = open_session(options, date).await?;
    let visible = session.search(query);
    print_matches(&session, visible);
    Ok(())
}

pub(crate) fn print_matches(session: &CliSession, visible: usize) {
    let selection = session.selection();
    let date = date_input_value(selection.date_key.as_ref());

    if visible == 0 {
        print_info(&format!("No units match '{}' on {date}", selection.filter.query()));
        return;
    }

    print_section_header(&format!("Units matching '{}' on {date}", selection.filter.query()));
    for layer in &selection.layers.units {
        let paint = get_side_color_style(layer.side);
        for marker in layer.markers.iter().filter(|marker| !marker.hidden) {
            let [x, y] = marker.coordinates;
            println!(
                "  {} {} {}",
                paint(layer.side.as_str()),
                marker.properties.name.white(),
                format!("({x:.4}, {y:.4})").bright_black()
            );
        }
    }
    println!("\n  {} visible\n", visible.to_string().white());
}
