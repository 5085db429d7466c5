use std::sync::Mutex;

/// Row-outcome counters for one batch run, shared across the worker pool.
pub struct BatchCounters {
    inner: Mutex<Counts>,
}

#[derive(Default)]
struct Counts {
    scored: usize,
    degenerate: usize,
    failed: usize,
}

impl BatchCounters {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counts::default()),
        }
    }

    pub fn record_scored(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.scored += 1;
        }
    }

    pub fn record_degenerate(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.degenerate += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.failed += 1;
        }
    }

    /// (scored, degenerate, failed) snapshot.
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(counts) = self.inner.lock() {
            (counts.scored, counts.degenerate, counts.failed)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for BatchCounters {
    fn default() -> Self {
        Self::new()
    }
}
