use std::time::{Duration, Instant};
use stream_overlay::cpu::{CpuMonitor, CpuProbe, MetricSampleError, SAMPLE_PERIOD};
use stream_overlay::grid::BlockGrid;
use stream_overlay::panel::ActivityPanel;
use stream_overlay::render::GridStyle;

/// Probe that replays a fixed list of readings.
struct ScriptedProbe {
    samples: Vec<Result<f32, MetricSampleError>>,
}

impl ScriptedProbe {
    fn new(samples: Vec<Result<f32, MetricSampleError>>) -> Self {
        Self { samples }
    }
}

impl CpuProbe for ScriptedProbe {
    fn sample(&mut self) -> Result<f32, MetricSampleError> {
        if self.samples.is_empty() {
            return Err(MetricSampleError {
                reason: "script exhausted",
            });
        }
        self.samples.remove(0)
    }
}

fn active_count(grid: &BlockGrid) -> usize {
    (0..grid.len()).filter(|i| grid.is_active(*i)).count()
}

#[test]
fn samples_rewrite_the_strip_every_period() {
    let mut grid = BlockGrid::new(100, 1);
    let mut monitor = CpuMonitor::with_probe(Box::new(ScriptedProbe::new(vec![
        Ok(0.5),
        Ok(0.1),
    ])));
    let t0 = Instant::now();

    assert!(monitor.tick(t0, &mut grid));
    assert_eq!(active_count(&grid), 50);
    for index in 0..50 {
        assert!(grid.is_active(index));
    }

    // Inside the period nothing happens, even with a reading queued.
    assert!(!monitor.tick(t0 + Duration::from_millis(100), &mut grid));
    assert_eq!(active_count(&grid), 50);

    // The next period drops the strip to the new reading.
    assert!(monitor.tick(t0 + SAMPLE_PERIOD, &mut grid));
    assert_eq!(active_count(&grid), 10);
}

#[test]
fn probe_errors_keep_the_previous_reading() {
    let mut grid = BlockGrid::new(10, 1);
    let mut monitor = CpuMonitor::with_probe(Box::new(ScriptedProbe::new(vec![
        Ok(0.7),
        Err(MetricSampleError {
            reason: "counter glitch",
        }),
        Ok(0.2),
    ])));
    let t0 = Instant::now();

    assert!(monitor.tick(t0, &mut grid));
    assert_eq!(active_count(&grid), 7);

    // The failed sample neither clears nor flickers the strip.
    assert!(!monitor.tick(t0 + SAMPLE_PERIOD, &mut grid));
    assert_eq!(active_count(&grid), 7);

    assert!(monitor.tick(t0 + 2 * SAMPLE_PERIOD, &mut grid));
    assert_eq!(active_count(&grid), 2);
}

#[test]
fn paused_monitor_stops_sampling() {
    let mut grid = BlockGrid::new(10, 1);
    let mut monitor =
        CpuMonitor::with_probe(Box::new(ScriptedProbe::new(vec![Ok(1.0), Ok(0.0)])));
    let t0 = Instant::now();

    monitor.tick(t0, &mut grid);
    assert_eq!(active_count(&grid), 10);

    monitor.pause();
    assert!(!monitor.is_running());
    assert!(!monitor.tick(t0 + SAMPLE_PERIOD, &mut grid));
    assert_eq!(active_count(&grid), 10);

    monitor.resume();
    assert!(monitor.tick(t0 + SAMPLE_PERIOD, &mut grid));
    assert_eq!(active_count(&grid), 0);
}

#[test]
fn cpu_panel_drives_its_monitor_from_tick() {
    let monitor = CpuMonitor::with_probe(Box::new(ScriptedProbe::new(vec![Ok(1.0)])));
    let mut panel = ActivityPanel::cpu_with_monitor(GridStyle::default(), 29, monitor);
    assert!(panel.is_capturing());

    assert!(panel.tick(Instant::now()));
    let snapshot = panel.snapshot();
    assert_eq!(snapshot.columns, 29);
    assert_eq!(snapshot.rows, 1);
    assert!(snapshot.cells.iter().all(|c| *c));
}
