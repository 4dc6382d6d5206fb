//! Dispatch timing.
//!
//! Every raw event the editor routes is one dispatch: normalization, hit
//! testing and reduction together. [`PerfMonitor`] keeps a window of recent
//! dispatch times and one [`OperationStats`] per reduced action.
//!
//! Blocks can be timed with [`profile_scope!`], which only costs anything
//! when the `profiling` feature is on:
//! ```toml
//! [dependencies]
//! layerboard = { features = ["profiling"] }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};
#[cfg(feature = "profiling")]
use tracing::trace;

use crate::constants::TARGET_DISPATCH_MS;

/// Dispatches kept for the rolling average
const DISPATCH_WINDOW: usize = 120;

/// Samples kept per action
const ACTION_WINDOW: usize = 100;

/// A dispatch slower than the budget times this factor is logged
const SLOW_FACTOR: f64 = 2.0;

/// Threshold for scopes timed by `profile_scope!`
const SCOPE_THRESHOLD_MS: f64 = 1.0;

/// Time the rest of the enclosing block. A no-op without `profiling`.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Fixed-capacity window of samples with a running sum.
#[derive(Debug, Clone)]
struct SampleWindow {
    samples: VecDeque<f64>,
    capacity: usize,
    sum: f64,
}

impl SampleWindow {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    fn push(&mut self, ms: f64) {
        if self.samples.len() == self.capacity {
            if let Some(evicted) = self.samples.pop_front() {
                self.sum -= evicted;
            }
        }
        self.samples.push_back(ms);
        self.sum += ms;
    }

    fn mean(&self) -> f64 {
        match self.samples.len() {
            0 => 0.0,
            n => self.sum / n as f64,
        }
    }

    fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Nearest-rank percentile, `q` in `0.0..=1.0`.
    fn percentile(&self, q: f64) -> f64 {
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        if sorted.is_empty() {
            return 0.0;
        }
        sorted.sort_by(f64::total_cmp);
        let rank = ((sorted.len() as f64) * q).floor() as usize;
        sorted[rank.min(sorted.len() - 1)]
    }
}

/// Timings of one action kind.
#[derive(Debug, Clone)]
pub struct OperationStats {
    recent: SampleWindow,
    count: u64,
    max_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            recent: SampleWindow::new(ACTION_WINDOW),
            count: 0,
            max_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        self.recent.push(ms);
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Mean of the recent window
    pub fn average(&self) -> f64 {
        self.recent.mean()
    }

    /// 95th percentile of the recent window
    pub fn p95(&self) -> f64 {
        self.recent.percentile(0.95)
    }

    /// Every recorded sample, including those that left the window
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Slowest sample ever recorded
    pub fn max(&self) -> f64 {
        self.max_ms
    }
}

/// Dispatch timings for one editor.
#[derive(Debug)]
pub struct PerfMonitor {
    dispatches: SampleWindow,
    pending: Option<Instant>,
    slow_dispatches: u64,
    total_dispatches: u64,
    by_action: HashMap<&'static str, OperationStats>,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self {
            dispatches: SampleWindow::new(DISPATCH_WINDOW),
            pending: None,
            slow_dispatches: 0,
            total_dispatches: 0,
            by_action: HashMap::new(),
        }
    }

    pub fn begin_dispatch(&mut self) {
        self.pending = Some(Instant::now());
    }

    /// Close the dispatch opened by [`PerfMonitor::begin_dispatch`] and
    /// return its duration in milliseconds. `None` if none was open.
    pub fn end_dispatch(&mut self) -> Option<f64> {
        let ms = elapsed_ms(self.pending.take()?);
        self.dispatches.push(ms);
        self.total_dispatches += 1;

        if ms > TARGET_DISPATCH_MS * SLOW_FACTOR {
            self.slow_dispatches += 1;
            warn!(
                dispatch_ms = format!("{ms:.2}"),
                budget_ms = format!("{TARGET_DISPATCH_MS:.2}"),
                "Slow dispatch"
            );
        }
        Some(ms)
    }

    /// Record how long reducing one action took.
    pub fn record_operation(&mut self, action: &'static str, ms: f64) {
        self.by_action.entry(action).or_default().record(ms);
    }

    pub fn get_operation_stats(&self, action: &str) -> Option<&OperationStats> {
        self.by_action.get(action)
    }

    pub fn average_dispatch_time(&self) -> f64 {
        self.dispatches.mean()
    }

    pub fn max_dispatch_time(&self) -> f64 {
        self.dispatches.max()
    }

    pub fn total_dispatches(&self) -> u64 {
        self.total_dispatches
    }

    /// Share of dispatches, in percent, that were logged as slow.
    pub fn slow_dispatch_percentage(&self) -> f64 {
        if self.total_dispatches == 0 {
            return 0.0;
        }
        self.slow_dispatches as f64 * 100.0 / self.total_dispatches as f64
    }

    /// Warn with a per-action breakdown when the average dispatch is over
    /// budget.
    pub fn log_summary_if_slow(&self) {
        let avg = self.average_dispatch_time();
        if avg <= TARGET_DISPATCH_MS {
            return;
        }
        warn!(
            avg_dispatch_ms = format!("{avg:.2}"),
            max_dispatch_ms = format!("{:.2}", self.max_dispatch_time()),
            slow_percentage = format!("{:.1}%", self.slow_dispatch_percentage()),
            "Dispatches over budget"
        );

        let mut slowest: Vec<_> = self.by_action.iter().collect();
        slowest.sort_by(|a, b| b.1.average().total_cmp(&a.1.average()));
        for (action, stats) in slowest.into_iter().take(5) {
            debug!(
                action = *action,
                avg_ms = format!("{:.2}", stats.average()),
                p95_ms = format!("{:.2}", stats.p95()),
                max_ms = format!("{:.2}", stats.max()),
                count = stats.count(),
                "Action timing"
            );
        }
    }
}

/// Timer behind [`profile_scope!`]; logs on drop when over the threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    #[cfg(feature = "profiling")]
    depth: usize,
}

#[cfg(feature = "profiling")]
thread_local! {
    static SCOPE_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            #[cfg(feature = "profiling")]
            depth: SCOPE_DEPTH.with(|d| d.replace(d.get() + 1)),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        elapsed_ms(self.start)
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let ms = self.elapsed_ms();
        #[cfg(feature = "profiling")]
        SCOPE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
        if ms <= SCOPE_THRESHOLD_MS {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("{}[PERF] {}: {:.2}ms", "  ".repeat(self.depth), self.name, ms);
        #[cfg(not(feature = "profiling"))]
        debug!(scope = self.name, elapsed_ms = format!("{ms:.2}"), "Slow scope");
    }
}

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, elapsed_ms(start))
}
