use crate::grid::CellDescriptor;
use crate::hooks::Key;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Logical footprint of the modeled keyboard, numpad included.
pub const LAYOUT_COLUMNS: usize = 21;
pub const LAYOUT_ROWS: usize = 6;

const fn cell(col: usize, row: usize, width: usize) -> CellDescriptor {
    CellDescriptor { col, row, width }
}

/// One entry per visible key. Keys without an entry (NumLock, right Win, the
/// remaining numpad operators, ...) are deliberately ignored by the overlay.
#[rustfmt::skip]
static KEY_TABLE: &[(Key, CellDescriptor)] = &[
    // Row 0: Escape, function keys and PrintScreen, with the usual cluster gaps.
    (Key::Escape, cell(0, 0, 1)),
    (Key::F1, cell(1, 0, 1)), (Key::F2, cell(2, 0, 1)), (Key::F3, cell(3, 0, 1)), (Key::F4, cell(4, 0, 1)),
    (Key::F5, cell(6, 0, 1)), (Key::F6, cell(7, 0, 1)), (Key::F7, cell(8, 0, 1)), (Key::F8, cell(9, 0, 1)),
    (Key::F9, cell(10, 0, 1)), (Key::F10, cell(11, 0, 1)), (Key::F11, cell(12, 0, 1)), (Key::F12, cell(13, 0, 1)),
    (Key::PrintScreen, cell(14, 0, 1)),

    // Row 1: number row, Backspace spanning two cells, then the nav column.
    (Key::Grave, cell(0, 1, 1)),
    (Key::Num1, cell(1, 1, 1)), (Key::Num2, cell(2, 1, 1)), (Key::Num3, cell(3, 1, 1)), (Key::Num4, cell(4, 1, 1)),
    (Key::Num5, cell(5, 1, 1)), (Key::Num6, cell(6, 1, 1)), (Key::Num7, cell(7, 1, 1)), (Key::Num8, cell(8, 1, 1)),
    (Key::Num9, cell(9, 1, 1)), (Key::Num0, cell(10, 1, 1)),
    (Key::Minus, cell(11, 1, 1)), (Key::Equal, cell(12, 1, 1)),
    (Key::Backspace, cell(13, 1, 2)),
    (Key::Insert, cell(15, 1, 1)), (Key::Home, cell(16, 1, 1)), (Key::PageUp, cell(17, 1, 1)),

    // Row 2: Tab spans two cells, QWERTY row, nav column, top numpad row.
    (Key::Tab, cell(0, 2, 2)),
    (Key::Q, cell(2, 2, 1)), (Key::W, cell(3, 2, 1)), (Key::E, cell(4, 2, 1)), (Key::R, cell(5, 2, 1)),
    (Key::T, cell(6, 2, 1)), (Key::Y, cell(7, 2, 1)), (Key::U, cell(8, 2, 1)), (Key::I, cell(9, 2, 1)),
    (Key::O, cell(10, 2, 1)), (Key::P, cell(11, 2, 1)),
    (Key::LeftBracket, cell(12, 2, 1)), (Key::RightBracket, cell(13, 2, 1)), (Key::Backslash, cell(14, 2, 1)),
    (Key::Delete, cell(15, 2, 1)), (Key::End, cell(16, 2, 1)), (Key::PageDown, cell(17, 2, 1)),
    (Key::Numpad7, cell(18, 2, 1)), (Key::Numpad8, cell(19, 2, 1)), (Key::Numpad9, cell(20, 2, 1)),

    // Row 3: CapsLock and Enter span two cells; numpad middle row plus plus.
    (Key::CapsLock, cell(0, 3, 2)),
    (Key::A, cell(2, 3, 1)), (Key::S, cell(3, 3, 1)), (Key::D, cell(4, 3, 1)), (Key::F, cell(5, 3, 1)),
    (Key::G, cell(6, 3, 1)), (Key::H, cell(7, 3, 1)), (Key::J, cell(8, 3, 1)), (Key::K, cell(9, 3, 1)),
    (Key::L, cell(10, 3, 1)),
    (Key::Semicolon, cell(11, 3, 1)), (Key::Quote, cell(12, 3, 1)),
    (Key::Enter, cell(13, 3, 2)),
    (Key::Numpad4, cell(17, 3, 1)), (Key::Numpad5, cell(18, 3, 1)), (Key::Numpad6, cell(19, 3, 1)),
    (Key::NumpadAdd, cell(20, 3, 1)),

    // Row 4: both Shifts span two cells; Up arrow sits alone before the numpad.
    (Key::ShiftLeft, cell(0, 4, 2)),
    (Key::Z, cell(2, 4, 1)), (Key::X, cell(3, 4, 1)), (Key::C, cell(4, 4, 1)), (Key::V, cell(5, 4, 1)),
    (Key::B, cell(6, 4, 1)), (Key::N, cell(7, 4, 1)), (Key::M, cell(8, 4, 1)),
    (Key::Comma, cell(9, 4, 1)), (Key::Period, cell(10, 4, 1)), (Key::Slash, cell(11, 4, 1)),
    (Key::ShiftRight, cell(13, 4, 2)),
    (Key::ArrowUp, cell(16, 4, 1)),
    (Key::Numpad1, cell(18, 4, 1)), (Key::Numpad2, cell(19, 4, 1)), (Key::Numpad3, cell(20, 4, 1)),

    // Row 5: modifier row, the five-cell space bar, arrows, wide numpad zero.
    (Key::ControlLeft, cell(0, 5, 1)), (Key::SuperLeft, cell(1, 5, 1)), (Key::AltLeft, cell(2, 5, 1)),
    (Key::Space, cell(3, 5, 5)),
    (Key::AltRight, cell(8, 5, 1)), (Key::ControlRight, cell(9, 5, 1)),
    (Key::ArrowLeft, cell(10, 5, 1)), (Key::ArrowDown, cell(11, 5, 1)), (Key::ArrowRight, cell(12, 5, 1)),
    (Key::Numpad0, cell(13, 5, 2)),
    (Key::NumpadDecimal, cell(15, 5, 1)),
];

static KEY_CELLS: Lazy<HashMap<Key, CellDescriptor>> =
    Lazy::new(|| KEY_TABLE.iter().copied().collect());

/// Looks up the grid position for a key. `None` for keys outside the modeled
/// footprint; callers treat that as a no-op, not an error.
pub fn cell_for_key(key: Key) -> Option<CellDescriptor> {
    KEY_CELLS.get(&key).copied()
}

/// All mapped entries, for layout validation.
pub fn entries() -> impl Iterator<Item = (Key, CellDescriptor)> {
    KEY_TABLE.iter().copied()
}
