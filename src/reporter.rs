//! Terminal progress reporting, grounded on the teacher's habit of driving
//! everything through the `log` facade rather than printing directly.

use crate::state::State;

/// Zone-updates-per-second throughput for the last `fold` iterations.
pub fn zone_updates_per_second(num_zones: usize, fold: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    (num_zones * fold) as f64 / elapsed_secs
}

/// Format and emit one progress line at `log::info!` level.
pub fn report_progress(state: &State, fold: usize, elapsed_secs: f64) {
    let zps = zone_updates_per_second(state.total_zones, fold, elapsed_secs);
    log::info!(
        "[{:06}] t={:.4} zones/sec={:.3e}",
        state.iteration,
        state.time,
        zps,
    );
}
