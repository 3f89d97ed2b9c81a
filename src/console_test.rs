use super::*;
use crate::controls::FilterControls;

#[test]
fn bare_text_is_a_query() {
    assert_eq!(parse_line("drill"), Ok(ConsoleCommand::Query("drill".into())));
    assert_eq!(parse_line(""), Ok(ConsoleCommand::Query(String::new())));
}

#[test]
fn query_command_keeps_inner_spaces() {
    assert_eq!(parse_line("/query drill press\n"), Ok(ConsoleCommand::Query("drill press".into())));
    assert_eq!(parse_line("/q"), Ok(ConsoleCommand::Query(String::new())));
}

#[test]
fn instock_toggle() {
    assert_eq!(parse_line("/instock on"), Ok(ConsoleCommand::InStock(true)));
    assert_eq!(parse_line("/instock OFF"), Ok(ConsoleCommand::InStock(false)));
    assert_eq!(parse_line("/instock maybe"), Err(ConsoleError::InvalidToggle("maybe".into())));
}

#[test]
fn selectors_default_to_any() {
    assert_eq!(parse_line("/room"), Ok(ConsoleCommand::Room(ANY.into())));
    assert_eq!(parse_line("/room Cage"), Ok(ConsoleCommand::Room("Cage".into())));
    assert_eq!(parse_line("/material Wood"), Ok(ConsoleCommand::Material("Wood".into())));
}

#[test]
fn refresh_and_quit() {
    assert_eq!(parse_line("/refresh"), Ok(ConsoleCommand::Refresh));
    assert_eq!(parse_line("/quit"), Ok(ConsoleCommand::Quit));
    assert_eq!(parse_line("/exit"), Ok(ConsoleCommand::Quit));
}

#[test]
fn unknown_command_errors() {
    assert_eq!(parse_line("/teleport home"), Err(ConsoleError::UnknownCommand("teleport".into())));
}

#[test]
fn apply_updates_panel() {
    let panel = ControlPanel::new();
    apply(&panel, &ConsoleCommand::Query("saw".into()));
    apply(&panel, &ConsoleCommand::InStock(true));
    apply(&panel, &ConsoleCommand::Room("B".into()));
    apply(&panel, &ConsoleCommand::Material("Wood".into()));

    assert_eq!(panel.query(), "saw");
    assert!(panel.in_stock_only());
    assert_eq!(panel.room(), "B");
    assert_eq!(panel.material(), "Wood");
}

#[test]
fn refresh_and_quit_leave_panel_alone() {
    let panel = ControlPanel::new();
    panel.set_query("saw");
    let before = panel.listener_count();
    apply(&panel, &ConsoleCommand::Refresh);
    apply(&panel, &ConsoleCommand::Quit);
    assert_eq!(panel.query(), "saw");
    assert_eq!(panel.listener_count(), before);
}
