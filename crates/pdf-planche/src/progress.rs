//! Progress reporting for long compositions
//!
//! Progress is advisory: observers are told how many pages have been placed
//! so far, and once more when the job completes.

/// A `(done, total)` progress sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(done: usize, total: usize) -> Self {
        Self { done, total }
    }

    /// Completed fraction in `0.0..=1.0`; an empty job counts as complete
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.done.min(self.total) as f32) / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

/// Receives progress updates from the composer
pub trait ProgressObserver: Send {
    fn on_progress(&mut self, done: usize, total: usize);
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, usize) + Send,
{
    fn on_progress(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}

/// Observer that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _done: usize, _total: usize) {}
}
