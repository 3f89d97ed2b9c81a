//! Line commands that drive the filter controls from a terminal.
//!
//! Syntax:
//! - `/query <text>` or any line not starting with `/`: set the search text
//! - `/instock on|off`
//! - `/room <name|any>`
//! - `/material <name|any>`
//! - `/refresh`: fetch the inventory now
//! - `/quit`

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;

use crate::controls::{ANY, ControlPanel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Query(String),
    InStock(bool),
    Room(String),
    Material(String),
    Refresh,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command `/{0}`")]
    UnknownCommand(String),
    #[error("expected `on` or `off`, got `{0}`")]
    InvalidToggle(String),
}

/// Parse one input line.
///
/// # Errors
///
/// Returns an error for unknown `/` commands or a bad `/instock` value.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ConsoleCommand::Query(line.to_owned()));
    };
    let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    let arg = arg.trim();
    match name {
        "query" | "q" => Ok(ConsoleCommand::Query(arg.to_owned())),
        "instock" => parse_toggle(arg).map(ConsoleCommand::InStock),
        "room" => Ok(ConsoleCommand::Room(selector(arg))),
        "material" => Ok(ConsoleCommand::Material(selector(arg))),
        "refresh" => Ok(ConsoleCommand::Refresh),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(ConsoleError::UnknownCommand(other.to_owned())),
    }
}

fn parse_toggle(arg: &str) -> Result<bool, ConsoleError> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ConsoleError::InvalidToggle(arg.to_owned())),
    }
}

fn selector(arg: &str) -> String {
    if arg.is_empty() { ANY.to_owned() } else { arg.to_owned() }
}

/// Apply a control command to the panel. `Refresh` and `Quit` are handled by
/// the input loop and leave the panel untouched.
pub fn apply(panel: &ControlPanel, command: &ConsoleCommand) {
    match command {
        ConsoleCommand::Query(text) => panel.set_query(text),
        ConsoleCommand::InStock(on) => panel.set_in_stock_only(*on),
        ConsoleCommand::Room(room) => panel.set_room(room),
        ConsoleCommand::Material(material) => panel.set_material(material),
        ConsoleCommand::Refresh | ConsoleCommand::Quit => {}
    }
}
