use std::time::{Duration, Instant};

/// How long the panel background stays highlighted after a [`BlockGrid::pulse`].
pub const PULSE_DURATION: Duration = Duration::from_millis(61);

/// Position and span of one key inside a block grid. `width` is the number of
/// contiguous cells the key occupies, starting at `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDescriptor {
    pub col: usize,
    pub row: usize,
    pub width: usize,
}

/// Consistent copy of a grid's state, taken under the grid lock and handed to
/// the renderer. The renderer never touches the live grid.
#[derive(Debug, Clone, Default)]
pub struct GridSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<bool>,
    pub highlighted: bool,
}

/// Single-shot coalescing deadline. Re-arming before expiry replaces the
/// deadline; there is never more than one pending expiry.
#[derive(Debug, Default)]
pub struct DecayTimer {
    deadline: Option<Instant>,
}

impl DecayTimer {
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.deadline = Some(now + duration);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clears the deadline once `now` has passed it. Returns `true` on the
    /// tick that observes the expiry, `false` before and after.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-size row-major grid of block states.
///
/// All mutation methods are short, allocation-free index writes so they can be
/// called under a mutex from the input-hook thread without risking the OS's
/// handler-latency ceiling. Ranges that fall outside the grid are silently
/// skipped; layout tables are allowed to produce `index + width` combinations
/// that run past the edge.
#[derive(Debug)]
pub struct BlockGrid {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
    highlight: DecayTimer,
}

impl BlockGrid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns * rows],
            highlight: DecayTimer::default(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(col, row)`. Valid inputs land in `[0, len)`.
    pub fn to_index(&self, col: usize, row: usize) -> usize {
        row * self.columns + col
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    pub fn activate(&mut self, index: usize, width: usize) {
        self.set_range(index, width, true);
    }

    pub fn deactivate(&mut self, index: usize, width: usize) {
        self.set_range(index, width, false);
    }

    fn set_range(&mut self, index: usize, width: usize, state: bool) {
        for offset in 0..width {
            if let Some(cell) = self.cells.get_mut(index.saturating_add(offset)) {
                *cell = state;
            }
        }
    }

    /// Sets cells `[0, count)` active and clears the rest. Used by sampled
    /// sources that rewrite the whole grid every tick.
    pub fn set_active_prefix(&mut self, count: usize) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = index < count;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Flashes the panel background. Re-triggering restarts the highlight
    /// window; pulses coalesce rather than queue.
    pub fn pulse(&mut self, now: Instant) {
        self.highlight.arm(now, PULSE_DURATION);
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_armed()
    }

    /// Processes the highlight deadline. Returns `true` when the highlight
    /// just decayed and a repaint is warranted.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.highlight.expire(now)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            columns: self.columns,
            rows: self.rows,
            cells: self.cells.clone(),
            highlighted: self.highlight.is_armed(),
        }
    }
}
