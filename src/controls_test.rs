use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting_callback() -> (Arc<AtomicUsize>, ChangeCallback) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    (hits, Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
}

#[test]
fn element_ids_are_stable() {
    assert_eq!(ControlId::SearchInput.element_id(), "inventory-search-input");
    assert_eq!(ControlId::InStockToggle.element_id(), "inventory-in-stock");
    assert_eq!(ControlId::RoomSelect.element_id(), "room-select");
    assert_eq!(ControlId::MaterialSelect.element_id(), "tool-material-select");
}

#[test]
fn search_input_triggers_on_keyup() {
    assert_eq!(ControlId::SearchInput.trigger(), "keyup");
    assert_eq!(ControlId::RoomSelect.trigger(), "change");
}

#[test]
fn panel_defaults() {
    let panel = ControlPanel::new();
    assert_eq!(panel.query(), "");
    assert!(!panel.in_stock_only());
    assert_eq!(panel.room(), ANY);
    assert_eq!(panel.material(), ANY);
}

#[test]
fn setters_update_values() {
    let panel = ControlPanel::new();
    panel.set_query("dr");
    panel.set_in_stock_only(true);
    panel.set_room("B");
    panel.set_material("Wood");
    assert_eq!(panel.query(), "dr");
    assert!(panel.in_stock_only());
    assert_eq!(panel.room(), "B");
    assert_eq!(panel.material(), "Wood");
}

#[test]
fn setters_without_listeners_are_quiet() {
    let panel = ControlPanel::new();
    panel.set_query("saw");
    assert_eq!(panel.listener_count(), 0);
}

#[test]
fn listener_fires_only_for_its_control() {
    let panel = ControlPanel::new();
    let (hits, callback) = counting_callback();
    panel.listen(ControlId::RoomSelect, callback).unwrap();

    panel.set_query("x");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    panel.set_room("A");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn on_any_change_attaches_all_four() {
    let panel = ControlPanel::new();
    let (hits, callback) = counting_callback();
    assert!(panel.on_any_change(callback).is_empty());
    assert_eq!(panel.listener_count(), 4);

    panel.set_query("a");
    panel.set_in_stock_only(true);
    panel.set_room("A");
    panel.set_material("Metal");
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn missing_control_fails_only_its_attachment() {
    let panel = ControlPanel::with_controls(&[ControlId::SearchInput, ControlId::InStockToggle, ControlId::MaterialSelect]);
    let (hits, callback) = counting_callback();
    let errors = panel.on_any_change(callback);

    assert_eq!(errors, vec![ControlError::Missing(ControlId::RoomSelect)]);
    assert_eq!(panel.listener_count(), 3);
    panel.set_material("Wood");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_may_read_panel() {
    let panel = Arc::new(ControlPanel::new());
    let seen = Arc::new(Mutex::new(String::new()));
    let (reader, sink) = (Arc::clone(&panel), Arc::clone(&seen));
    panel
        .listen(ControlId::SearchInput, Arc::new(move || {
            *sink.lock().unwrap() = reader.query();
        }))
        .unwrap();

    panel.set_query("lathe");
    assert_eq!(*seen.lock().unwrap(), "lathe");
}

#[test]
fn missing_error_names_element() {
    let err = ControlError::Missing(ControlId::RoomSelect);
    assert_eq!(err.to_string(), "control element `room-select` not found");
}
