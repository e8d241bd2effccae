//! Shared setup for commands that need an open viewer session.
//!
//! # Initialization Steps
//! 1. **Config**: load the user's config and apply command-line overrides
//! 2. **Transport**: pick the HTTP or directory fetcher for the data source
//! 3. **Session**: load the manifest and render the requested date

use crate::core::{
    config::ViewerConfig,
    error::Result,
    fetcher::Fetcher,
    layers::InMemoryMap,
    output::{format_date_line, format_side_count, print_field, print_section_header},
    session::Session,
    side::Side,
};

/// Session type the CLI drives: any fetcher, recording map surface
pub type CliSession = Session<Box<dyn Fetcher>, InMemoryMap>;

/// Options shared by every command, taken from global flags
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub data: Option<String>,
    pub cache_capacity: Option<usize>,
    pub zoom: Option<u8>,
}

impl GlobalOptions {
    pub fn resolve_config(&self) -> Result<ViewerConfig> {
        Ok(ViewerConfig::load_or_default()?.with_overrides(
            self.data.clone(),
            self.cache_capacity,
            self.zoom,
        ))
    }
}

/// Open a session showing `date`, or the latest date when none is given.
/// Only the date actually shown is fetched.
pub async fn open_session(options: &GlobalOptions, date: Option<&str>) -> Result<CliSession> {
    let config = options.resolve_config()?;
    let fetcher = config.data_source().into_fetcher();
    let map = InMemoryMap::new();
    match date {
        Some(date) => {
            let mut session = Session::load(fetcher, map, config.session_options()).await?;
            session.go_to_input(date).await?;
            Ok(session)
        }
        None => Session::open(fetcher, map, config.session_options()).await,
    }
}

/// Open a session without rendering a date
pub async fn load_session(options: &GlobalOptions) -> Result<CliSession> {
    let config = options.resolve_config()?;
    let fetcher = config.data_source().into_fetcher();
    Session::load(fetcher, InMemoryMap::new(), config.session_options()).await
}

pub const FIELD_WIDTH: usize = 14;

/// Print what the session is currently showing
pub fn print_snapshot_summary(session: &CliSession) {
    let selection = session.selection();
    print_section_header("Snapshot");
    print_field(
        "date",
        format_date_line(selection.date_key.as_ref(), session.state()),
        FIELD_WIDTH,
    );

    let front_points = selection
        .snapshot
        .as_ref()
        .map(|snapshot| snapshot.frontline.point_count())
        .unwrap_or(0);
    print_field("frontline", format!("{front_points} points"), FIELD_WIDTH);

    for side in Side::ALL {
        let units: usize = selection
            .layers
            .units
            .iter()
            .filter(|layer| layer.side == side)
            .map(|layer| layer.markers.len())
            .sum();
        let geos: usize = selection
            .layers
            .geos
            .iter()
            .filter(|layer| layer.side == side)
            .map(|layer| layer.collection.len())
            .sum();
        print_field("units", format_side_count(side, units), FIELD_WIDTH);
        print_field("points", format_side_count(side, geos), FIELD_WIDTH);
    }

    if !selection.filter.is_empty() {
        print_field(
            "search",
            format!(
                "'{}' ({} visible)",
                selection.filter.query(),
                selection.layers.visible_unit_count()
            ),
            FIELD_WIDTH,
        );
    }
    println!();
}
