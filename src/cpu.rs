use crate::grid::BlockGrid;
use std::time::{Duration, Instant};
use sysinfo::System;
use thiserror::Error;

/// Fixed sampling period, independent of the paint cadence.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(500);

/// Transient failure reading the utilization counter. Recovered locally by
/// keeping the previous grid state; never surfaced to the caller.
#[derive(Debug, Error)]
#[error("cpu sample unavailable: {reason}")]
pub struct MetricSampleError {
    pub reason: &'static str,
}

/// Source of utilization readings as a fraction in `[0.0, 1.0]`.
pub trait CpuProbe: Send {
    fn sample(&mut self) -> Result<f32, MetricSampleError>;
}

/// Probe backed by the system counters. Counters of this kind need one
/// priming read, so construction performs a refresh whose value is discarded.
pub struct SysinfoProbe {
    system: System,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self { system }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuProbe for SysinfoProbe {
    fn sample(&mut self) -> Result<f32, MetricSampleError> {
        self.system.refresh_cpu_usage();
        if self.system.cpus().is_empty() {
            return Err(MetricSampleError {
                reason: "no cpus reported",
            });
        }
        let usage = self.system.global_cpu_usage();
        if !usage.is_finite() {
            return Err(MetricSampleError {
                reason: "non-finite usage reading",
            });
        }
        Ok((usage / 100.0).clamp(0.0, 1.0))
    }
}

/// Number of active cells for a utilization reading on a `columns`-wide strip.
pub fn active_cell_count(utilization: f32, columns: usize) -> usize {
    let count = (utilization.clamp(0.0, 1.0) * columns as f32).floor() as usize;
    count.min(columns)
}

/// Drives a probe on [`SAMPLE_PERIOD`] from the host's cooperative update
/// loop and rewrites the whole strip on every successful sample.
pub struct CpuMonitor {
    probe: Box<dyn CpuProbe>,
    last_sample: Option<Instant>,
    running: bool,
}

impl CpuMonitor {
    pub fn new() -> Self {
        Self::with_probe(Box::new(SysinfoProbe::new()))
    }

    pub fn with_probe(probe: Box<dyn CpuProbe>) -> Self {
        Self {
            probe,
            last_sample: None,
            running: true,
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Samples when the period has elapsed and updates `grid`. Returns `true`
    /// when the grid was rewritten. Probe errors keep the previous state.
    pub fn tick(&mut self, now: Instant, grid: &mut BlockGrid) -> bool {
        if !self.running {
            return false;
        }
        if let Some(last) = self.last_sample {
            if now.duration_since(last) < SAMPLE_PERIOD {
                return false;
            }
        }
        self.last_sample = Some(now);

        match self.probe.sample() {
            Ok(utilization) => {
                let count = active_cell_count(utilization, grid.columns());
                grid.set_active_prefix(count);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "cpu sample failed; keeping previous reading");
                false
            }
        }
    }
}

impl Default for CpuMonitor {
    fn default() -> Self {
        Self::new()
    }
}
