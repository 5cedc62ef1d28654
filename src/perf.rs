//! Performance instrumentation for the interaction hot paths.
//!
//! Drag updates and hover hit tests run every animation frame, so the engine
//! carries lightweight timing for them:
//!
//! - **Scoped timers**: RAII-style timing for code blocks; every completed
//!   timer records into the per-operation statistics registry
//! - **Aggregated statistics**: rolling samples per operation name, queried
//!   with [`operation_stats`]
//! - **Conditional compilation**: `profile_scope!` call sites compile to
//!   nothing without the `profiling` feature
//!
//! Enable with `cargo build --features profiling` and instrument with
//! `profile_scope!("name")`.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Instant;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Number of samples kept per operation for rolling statistics
const STATS_SAMPLE_COUNT: usize = 100;

/// Per-operation rolling statistics, keyed by scope name.
static STATS: Lazy<Mutex<HashMap<&'static str, OperationStats>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Profile a scope with the given name. Compiles to nothing without the
/// `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// The recorded statistics for one operation, if any timer has completed
/// under that name.
pub fn operation_stats(name: &str) -> Option<OperationStats> {
    STATS.lock().get(name).cloned()
}

fn record(name: &'static str, elapsed_ms: f64) {
    STATS.lock().entry(name).or_default().record(elapsed_ms);
}

/// RAII timer that records its scope's duration into the statistics
/// registry on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: Option<f64>,
}

impl ScopedTimer {
    /// Timer that traces every completion in a `profiling` build.
    pub fn for_profiling(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms: None,
        }
    }

    /// Timer that also warns when the scope exceeds a millisecond threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms: Some(threshold_ms),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        record(self.name, elapsed_ms);
        match self.threshold_ms {
            Some(threshold) if elapsed_ms > threshold => {
                warn!(scope = self.name, elapsed_ms, threshold, "slow scope");
            }
            Some(_) => {}
            None => {
                #[cfg(feature = "profiling")]
                trace!(scope = self.name, elapsed_ms, "scope timing");
            }
        }
    }
}

/// Rolling timing statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    min_ms: f64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Rolling average over the retained samples.
    pub fn average_ms(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn min_ms(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }
}
