use std::sync::atomic::{AtomicU32, Ordering};

/// The four numeric metrics a sampler reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Position,
    Duration,
    Width,
    Height,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Position,
        Metric::Duration,
        Metric::Width,
        Metric::Height,
    ];
}

/// Last successfully sampled value of each metric.
///
/// Written by the read path and by retries on the retry context, so every slot
/// is an atomic rather than sitting behind a lock.
#[derive(Debug, Default)]
pub struct MetricCache {
    position: AtomicU32,
    duration: AtomicU32,
    width: AtomicU32,
    height: AtomicU32,
}

impl MetricCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, metric: Metric) -> u32 {
        self.slot(metric).load(Ordering::Relaxed)
    }

    pub fn store(&self, metric: Metric, value: u32) {
        self.slot(metric).store(value, Ordering::Relaxed);
    }

    fn slot(&self, metric: Metric) -> &AtomicU32 {
        match metric {
            Metric::Position => &self.position,
            Metric::Duration => &self.duration,
            Metric::Width => &self.width,
            Metric::Height => &self.height,
        }
    }
}
