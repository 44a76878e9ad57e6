use std::time::{Duration, Instant};
use stream_overlay::hooks::{
    HookChannel, InputEvent, InputHook, Key, MockHookBackend, MouseButton, UnsupportedHookBackend,
    WheelDirection,
};
use stream_overlay::panel::{
    ActivityPanel, MOUSE_LEFT_CELL, MOUSE_MIDDLE_CELL, MOUSE_RIGHT_CELL, MOUSE_SCROLL_CELL,
};
use stream_overlay::render::GridStyle;

fn keyboard_panel() -> (ActivityPanel, stream_overlay::hooks::MockHookHandle) {
    let (backend, handle) = MockHookBackend::new();
    let hook = InputHook::with_backend(HookChannel::Keyboard, Box::new(backend));
    (
        ActivityPanel::keyboard_with_hook(GridStyle::default(), hook),
        handle,
    )
}

fn mouse_panel() -> (ActivityPanel, stream_overlay::hooks::MockHookHandle) {
    let (backend, handle) = MockHookBackend::new();
    let hook = InputHook::with_backend(HookChannel::Mouse, Box::new(backend));
    (
        ActivityPanel::mouse_with_hook(GridStyle::default(), hook),
        handle,
    )
}

#[test]
fn key_down_lights_the_mapped_cell_and_key_up_clears_it() {
    let (panel, handle) = keyboard_panel();

    // A sits at (col 2, row 3) on the 21-wide grid.
    assert!(handle.emit(InputEvent::KeyDown(Key::A)));
    let snapshot = panel.snapshot();
    assert!(snapshot.cells[3 * 21 + 2]);
    assert_eq!(snapshot.cells.iter().filter(|c| **c).count(), 1);

    assert!(handle.emit(InputEvent::KeyUp(Key::A)));
    let snapshot = panel.snapshot();
    assert!(!snapshot.cells[3 * 21 + 2]);
    assert!(snapshot.cells.iter().all(|c| !c));
}

#[test]
fn wide_keys_light_their_whole_span() {
    let (panel, handle) = keyboard_panel();

    handle.emit(InputEvent::KeyDown(Key::Space));
    let snapshot = panel.snapshot();
    // Space covers columns 3..8 of row 5.
    for col in 3..8 {
        assert!(snapshot.cells[5 * 21 + col], "column {col} should be lit");
    }
    assert_eq!(snapshot.cells.iter().filter(|c| **c).count(), 5);

    handle.emit(InputEvent::KeyUp(Key::Space));
    assert!(panel.snapshot().cells.iter().all(|c| !c));
}

#[test]
fn keys_outside_the_layout_are_ignored() {
    let (panel, handle) = keyboard_panel();

    handle.emit(InputEvent::KeyDown(Key::NumLock));
    handle.emit(InputEvent::KeyDown(Key::SuperRight));
    assert!(panel.snapshot().cells.iter().all(|c| !c));
}

#[test]
fn mouse_buttons_map_to_their_cells() {
    let (panel, handle) = mouse_panel();

    handle.emit(InputEvent::ButtonDown(MouseButton::Left));
    handle.emit(InputEvent::ButtonDown(MouseButton::Right));
    handle.emit(InputEvent::ButtonDown(MouseButton::Middle));
    let snapshot = panel.snapshot();
    assert!(snapshot.cells[MOUSE_LEFT_CELL]);
    assert!(snapshot.cells[MOUSE_RIGHT_CELL]);
    assert!(snapshot.cells[MOUSE_MIDDLE_CELL]);
    assert!(!snapshot.cells[MOUSE_SCROLL_CELL]);

    handle.emit(InputEvent::ButtonUp(MouseButton::Right));
    let snapshot = panel.snapshot();
    assert!(snapshot.cells[MOUSE_LEFT_CELL]);
    assert!(!snapshot.cells[MOUSE_RIGHT_CELL]);
    assert!(snapshot.cells[MOUSE_MIDDLE_CELL]);
}

#[test]
fn scroll_cell_decays_after_the_wheel_goes_quiet() {
    let (mut panel, handle) = mouse_panel();

    handle.emit(InputEvent::Wheel(WheelDirection::Up));
    assert!(panel.snapshot().cells[MOUSE_SCROLL_CELL]);

    // Still lit right away, decayed once the window has passed.
    panel.tick(Instant::now());
    assert!(panel.snapshot().cells[MOUSE_SCROLL_CELL]);

    panel.tick(Instant::now() + Duration::from_millis(150));
    assert!(!panel.snapshot().cells[MOUSE_SCROLL_CELL]);
}

#[test]
fn wheel_direction_does_not_matter_for_the_scroll_cell() {
    let (panel, handle) = mouse_panel();

    handle.emit(InputEvent::Wheel(WheelDirection::Down));
    assert!(panel.snapshot().cells[MOUSE_SCROLL_CELL]);
}

#[test]
fn pointer_movement_flashes_and_decays() {
    let (mut panel, handle) = mouse_panel();
    assert!(!panel.snapshot().highlighted);

    handle.emit(InputEvent::PointerMoved);
    assert!(panel.snapshot().highlighted);

    panel.tick(Instant::now() + Duration::from_millis(100));
    assert!(!panel.snapshot().highlighted);
}

#[test]
fn paused_panels_drop_events_until_resumed() {
    let (mut panel, handle) = keyboard_panel();

    panel.pause();
    handle.emit(InputEvent::KeyDown(Key::Q));
    assert!(panel.snapshot().cells.iter().all(|c| !c));

    panel.resume();
    handle.emit(InputEvent::KeyDown(Key::Q));
    assert!(panel.snapshot().cells.iter().any(|c| *c));
}

#[test]
fn dropping_a_panel_releases_its_hook() {
    let (panel, handle) = keyboard_panel();
    assert_eq!(handle.install_count(), 1);
    assert!(panel.is_capturing());

    drop(panel);
    assert_eq!(handle.uninstall_count(), 1);
    assert!(!handle.emit(InputEvent::KeyDown(Key::A)));
}

#[test]
fn refused_hook_leaves_the_panel_alive_but_inert() {
    let hook = InputHook::with_backend(HookChannel::Keyboard, Box::new(UnsupportedHookBackend));
    let panel = ActivityPanel::keyboard_with_hook(GridStyle::default(), hook);

    assert!(!panel.is_capturing());
    let snapshot = panel.snapshot();
    assert_eq!(snapshot.columns, 21);
    assert_eq!(snapshot.rows, 6);
    assert!(snapshot.cells.iter().all(|c| !c));
}
