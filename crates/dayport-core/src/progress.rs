//! Progress notification.

/// Receives the completion percentage after each processed entry.
pub trait ProgressSink {
    fn emit(&mut self, percentage: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64),
{
    fn emit(&mut self, percentage: f64) {
        self(percentage)
    }
}

/// Sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&mut self, _percentage: f64) {}
}

/// Percentage after `done` of `total` entries.
pub(crate) fn percentage(done: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}
