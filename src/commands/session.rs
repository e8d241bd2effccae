//! Interactive session driven by line commands on stdin.
//!
//! Each line is one UI event. Errors from a single event are printed and
//! the loop carries on; the previous rendering stays in place.

use crate::commands::context::{open_session, print_snapshot_summary, CliSession, GlobalOptions, FIELD_WIDTH};
use crate::commands::search::print_matches;
use crate::core::{
    colors::get_colored_switch,
    error::{Result, ViewerError},
    layers::LayerKind,
    output::{print_error, print_field, print_info, print_section_header},
    timeline::Direction,
};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: first | last | next | previous | next-7 | previous-7 | date <value> | search <text> | zoom <n> | toggle <layer> | status | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Navigate(Direction),
    GoTo(String),
    Search(String),
    Zoom(u8),
    Toggle(LayerKind),
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = ViewerError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (word, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw.trim();
        match word {
            "date" | "goto" => Ok(SessionCommand::GoTo(rest.to_string())),
            // The query is taken verbatim after the separator
            "search" => Ok(SessionCommand::Search(raw.to_string())),
            "zoom" => rest
                .parse()
                .map(SessionCommand::Zoom)
                .map_err(|_| ViewerError::invalid_zoom(rest)),
            "toggle" => rest.parse().map(SessionCommand::Toggle),
            "status" => Ok(SessionCommand::Status),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => other.parse().map(SessionCommand::Navigate),
        }
    }
}

pub async fn execute_session(options: &GlobalOptions) -> Result<()> {
    let mut session = open_session(options, None).await?;
    print_snapshot_summary(&session);
    print_info(HELP);
    run_session(&mut session, BufReader::new(tokio::io::stdin())).await
}

/// Feed every line of `input` to the session until `quit` or end of input
pub async fn run_session<R>(session: &mut CliSession, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                print_error(&e.to_string());
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        if let Err(e) = handle(session, command).await {
            print_error(&e.to_string());
        }
    }
    Ok(())
}

async fn handle(session: &mut CliSession, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Navigate(direction) => {
            session.navigate(direction).await?;
            print_snapshot_summary(session);
        }
        SessionCommand::GoTo(input) => {
            session.go_to_input(&input).await?;
            print_snapshot_summary(session);
        }
        SessionCommand::Search(query) => {
            let visible = session.search(&query);
            print_matches(session, visible);
        }
        SessionCommand::Zoom(zoom) => {
            session.zoom(zoom);
            print_info(&format!("Zoom set to {zoom}"));
        }
        SessionCommand::Toggle(kind) => {
            let enabled = session.toggle(kind);
            print_info(&format!("{kind} {}", get_colored_switch(enabled)));
        }
        SessionCommand::Status => print_status(session),
        SessionCommand::Help => print_info(HELP),
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn print_status(session: &CliSession) {
    print_snapshot_summary(session);

    print_section_header("Layers");
    let toggles = session.toggles();
    print_field("frontline", get_colored_switch(true), FIELD_WIDTH);
    for kind in LayerKind::TOGGLEABLE {
        print_field(kind.as_str(), get_colored_switch(toggles.is_enabled(kind)), FIELD_WIDTH);
    }

    print_section_header("Cache");
    let cached: Vec<String> = session
        .store()
        .cached_keys()
        .iter()
        .map(|key| key.to_date_string())
        .collect();
    print_field(
        "entries",
        format!("{}/{}", cached.len(), session.store().cache().capacity()),
        FIELD_WIDTH,
    );
    print_field("dates", cached.join(", "), FIELD_WIDTH);
    let (first, last) = session.timeline().bounds();
    print_field("range", format!("{first} to {last}"), FIELD_WIDTH);
    println!();
}
