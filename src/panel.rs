use crate::cpu::CpuMonitor;
use crate::grid::{BlockGrid, DecayTimer, GridSnapshot};
use crate::hooks::{EventSink, InputEvent, InputHook, MouseButton};
use crate::key_layout::{self, LAYOUT_COLUMNS, LAYOUT_ROWS};
use crate::render::{self, GridStyle};
use eframe::egui::Vec2;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Mouse grid cell assignments on the 2×2 grid.
pub const MOUSE_LEFT_CELL: usize = 0;
pub const MOUSE_RIGHT_CELL: usize = 1;
pub const MOUSE_MIDDLE_CELL: usize = 2;
pub const MOUSE_SCROLL_CELL: usize = 3;

pub const MOUSE_COLUMNS: usize = 2;
pub const MOUSE_ROWS: usize = 2;

/// How long the scroll cell stays lit after the last wheel notch.
pub const SCROLL_DECAY: Duration = Duration::from_millis(100);

/// State shared between the input-callback domain and the render domain.
/// Every access is a short critical section of plain index writes.
struct PanelShared {
    grid: BlockGrid,
    scroll_off: DecayTimer,
    paused: bool,
}

impl PanelShared {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            grid: BlockGrid::new(columns, rows),
            scroll_off: DecayTimer::default(),
            paused: false,
        }
    }
}

enum PanelSource {
    Hook(InputHook),
    Cpu(CpuMonitor),
}

/// One activity grid plus the event source feeding it. The keyboard, mouse
/// and CPU variants differ only in grid shape and in how events map to cell
/// indices; the source is injected rather than subclassed.
pub struct ActivityPanel {
    shared: Arc<Mutex<PanelShared>>,
    style: GridStyle,
    columns: usize,
    rows: usize,
    source: PanelSource,
}

impl ActivityPanel {
    /// 21×6 keyboard grid fed by a global keyboard hook.
    pub fn keyboard(style: GridStyle) -> Self {
        Self::keyboard_with_hook(style, InputHook::keyboard())
    }

    pub fn keyboard_with_hook(style: GridStyle, hook: InputHook) -> Self {
        let shared = Arc::new(Mutex::new(PanelShared::new(LAYOUT_COLUMNS, LAYOUT_ROWS)));
        let sink = keyboard_sink(Arc::clone(&shared));
        Self::with_hook(style, LAYOUT_COLUMNS, LAYOUT_ROWS, shared, hook, sink)
    }

    /// 2×2 mouse grid (left, right, middle, scroll) fed by a global mouse
    /// hook. Pointer movement flashes the panel background.
    pub fn mouse(style: GridStyle) -> Self {
        Self::mouse_with_hook(style, InputHook::mouse())
    }

    pub fn mouse_with_hook(style: GridStyle, hook: InputHook) -> Self {
        let shared = Arc::new(Mutex::new(PanelShared::new(MOUSE_COLUMNS, MOUSE_ROWS)));
        let sink = mouse_sink(Arc::clone(&shared));
        Self::with_hook(style, MOUSE_COLUMNS, MOUSE_ROWS, shared, hook, sink)
    }

    fn with_hook(
        style: GridStyle,
        columns: usize,
        rows: usize,
        shared: Arc<Mutex<PanelShared>>,
        mut hook: InputHook,
        sink: EventSink,
    ) -> Self {
        // A refused hook is fatal to this capture channel only; the panel
        // stays alive with an inert grid.
        if let Err(err) = hook.install(sink) {
            tracing::error!(%err, channel = ?hook.channel(), "input capture unavailable");
        }
        Self {
            shared,
            style,
            columns,
            rows,
            source: PanelSource::Hook(hook),
        }
    }

    /// Single-row CPU strip fed by the sampled utilization monitor.
    pub fn cpu(style: GridStyle, columns: usize) -> Self {
        Self::cpu_with_monitor(style, columns, CpuMonitor::new())
    }

    pub fn cpu_with_monitor(style: GridStyle, columns: usize, monitor: CpuMonitor) -> Self {
        Self {
            shared: Arc::new(Mutex::new(PanelShared::new(columns, 1))),
            style,
            columns,
            rows: 1,
            source: PanelSource::Cpu(monitor),
        }
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixel footprint for host layout.
    pub fn pixel_size(&self) -> Vec2 {
        render::panel_size(&self.style, self.columns, self.rows)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.shared
            .lock()
            .map(|shared| shared.grid.snapshot())
            .unwrap_or_default()
    }

    /// Whether the underlying source is live (hook installed / sampler
    /// running).
    pub fn is_capturing(&self) -> bool {
        match &self.source {
            PanelSource::Hook(hook) => hook.is_installed(),
            PanelSource::Cpu(monitor) => monitor.is_running(),
        }
    }

    /// Advances decay deadlines and, for the CPU variant, the sampler.
    /// Returns `true` when the grid changed and a repaint is warranted.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Ok(mut shared) = self.shared.lock() else {
            return false;
        };
        if shared.paused {
            return false;
        }
        let shared = &mut *shared;

        let mut changed = shared.grid.tick(now);
        if shared.scroll_off.expire(now) {
            shared.grid.deactivate(MOUSE_SCROLL_CELL, 1);
            changed = true;
        }
        if let PanelSource::Cpu(monitor) = &mut self.source {
            changed |= monitor.tick(now, &mut shared.grid);
        }
        changed
    }

    /// Stops the source without destroying it: hook-backed panels drop events
    /// while paused, the CPU variant stops sampling.
    pub fn pause(&mut self) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.paused = true;
        }
        if let PanelSource::Cpu(monitor) = &mut self.source {
            monitor.pause();
        }
    }

    pub fn resume(&mut self) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.paused = false;
        }
        if let PanelSource::Cpu(monitor) = &mut self.source {
            monitor.resume();
        }
    }
}

fn keyboard_sink(shared: Arc<Mutex<PanelShared>>) -> EventSink {
    Arc::new(move |event| {
        let Ok(mut state) = shared.lock() else {
            return;
        };
        if state.paused {
            return;
        }
        match event {
            InputEvent::KeyDown(key) => {
                if let Some(cell) = key_layout::cell_for_key(key) {
                    let index = state.grid.to_index(cell.col, cell.row);
                    state.grid.activate(index, cell.width);
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(cell) = key_layout::cell_for_key(key) {
                    let index = state.grid.to_index(cell.col, cell.row);
                    state.grid.deactivate(index, cell.width);
                }
            }
            _ => {}
        }
    })
}

fn mouse_sink(shared: Arc<Mutex<PanelShared>>) -> EventSink {
    Arc::new(move |event| {
        let Ok(mut state) = shared.lock() else {
            return;
        };
        if state.paused {
            return;
        }
        let now = Instant::now();
        match event {
            InputEvent::ButtonDown(button) => state.grid.activate(button_cell(button), 1),
            InputEvent::ButtonUp(button) => state.grid.deactivate(button_cell(button), 1),
            InputEvent::Wheel(_) => {
                state.grid.activate(MOUSE_SCROLL_CELL, 1);
                state.scroll_off.arm(now, SCROLL_DECAY);
            }
            InputEvent::PointerMoved => state.grid.pulse(now),
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {}
        }
    })
}

fn button_cell(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => MOUSE_LEFT_CELL,
        MouseButton::Right => MOUSE_RIGHT_CELL,
        MouseButton::Middle => MOUSE_MIDDLE_CELL,
    }
}
