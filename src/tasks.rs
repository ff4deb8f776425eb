use std::time::Instant;
use serde::{Serialize, Deserialize};




/**
 * A task, or side-effect, such as a checkpoint or a products write, that
 * recurs on a fixed simulation-time interval.
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct RecurringTask {

    /// The number of times this task has been performed
    count: usize,

    /// The next simulation time at which this task is set to be performed
    next_time: f64,

    /// The last clock time when this task was performed
    #[serde(skip, default = "Instant::now")]
    last_performed: Instant,
}




/**
 * A reporting cadence measured in iterations rather than simulation time,
 * matching the driver's `fold` parameter: progress is summarized every
 * `fold` iterations instead of on a wall- or simulation-clock schedule.
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct FoldCounter {
    fold: usize,
    next_iteration: u64,

    #[serde(skip, default = "Instant::now")]
    last_performed: Instant,
}




/**
 * All the tasks that are used in this application
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct Tasks {

    /// Write a snapshot of the full simulation
    pub write_checkpoint: RecurringTask,

    /// Output the primitive quantities for plotting and post-processing
    pub write_primitives: RecurringTask,

    /// Summarize the simulation performance every `fold` iterations
    pub report_progress: FoldCounter,
}




// ============================================================================
impl RecurringTask
{

    /**
     * Create a fresh recurring task which is first due at t = 0.0.
     */
    pub fn new() -> Self {
        Self{
            count: 0,
            next_time: 0.0,
            last_performed: Instant::now(),
        }
    }

    pub fn is_due(&self, time: f64) -> bool {
        time >= self.next_time
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /**
     * Mark the task as having just been performed, and schedule it to happen
     * again after the given time interval.
     */
    pub fn advance(&mut self, interval: f64) {
        self.count += 1;
        self.next_time += interval;
        self.last_performed = Instant::now();
    }
}




// ============================================================================
impl FoldCounter {
    pub fn new(fold: usize) -> Self {
        Self {
            fold: fold.max(1),
            next_iteration: 0,
            last_performed: Instant::now(),
        }
    }

    pub fn is_due(&self, iteration: u64) -> bool {
        iteration >= self.next_iteration
    }

    /// Seconds elapsed (wall clock) since this counter last fired.
    pub fn elapsed_secs(&self) -> f64 {
        self.last_performed.elapsed().as_secs_f64()
    }

    pub fn advance(&mut self) {
        self.next_iteration += self.fold as u64;
        self.last_performed = Instant::now();
    }
}




// ============================================================================
impl Tasks
{
    pub fn new(fold: usize) -> Self {
        Self{
            write_checkpoint: RecurringTask::new(),
            write_primitives: RecurringTask::new(),
            report_progress: FoldCounter::new(fold),
        }
    }
}
