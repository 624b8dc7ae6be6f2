//! Log sampling for high-volume scenarios
//!
//! Bounds the write volume of repeated records. Within each tick, the first
//! `initial` records with a given level and message pass through, then only
//! every `thereafter`-th one does. Counters reset when the tick expires.
//!
//! # Example
//!
//! ```
//! use rust_log_facade::{LogLevel, LogSampler, SamplingConfig};
//!
//! let sampler = LogSampler::new(SamplingConfig::default());
//!
//! let passed = (0..1000)
//!     .filter(|_| sampler.should_sample(LogLevel::Info, "cache miss"))
//!     .count();
//!
//! // 100 initial records, then every 100th of the remaining 900
//! assert_eq!(passed, 109);
//! ```

use super::log_level::LogLevel;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Records per level and message that always pass within one tick
pub const DEFAULT_SAMPLING_INITIAL: u64 = 100;

/// After the initial burst, one in this many records passes
pub const DEFAULT_SAMPLING_THEREAFTER: u64 = 100;

/// Number of counter slots per level; messages hash into these
const COUNTERS_PER_LEVEL: usize = 4096;

/// Configuration for log sampling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Records per (level, message) logged unconditionally in each tick
    pub initial: u64,

    /// After `initial`, every `thereafter`-th record is logged.
    /// Zero drops everything past the initial burst.
    pub thereafter: u64,

    /// Length of the counting window
    pub tick: Duration,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: DEFAULT_SAMPLING_INITIAL,
            thereafter: DEFAULT_SAMPLING_THEREAFTER,
            tick: Duration::from_secs(1),
        }
    }
}

impl SamplingConfig {
    pub fn new(initial: u64, thereafter: u64) -> Self {
        Self {
            initial,
            thereafter,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

/// Per-slot counter, reset lazily once its window has passed
#[derive(Debug, Default)]
struct Counter {
    /// Nanoseconds since sampler start at which the window ends
    reset_at: AtomicI64,
    count: AtomicU64,
}

impl Counter {
    fn inc_check_reset(&self, now: i64, tick: Duration) -> u64 {
        let reset_after = self.reset_at.load(Ordering::Acquire);
        if reset_after > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        // Window expired: start a new one. Losing the race just means
        // another thread already reset it, so count against the new window.
        self.count.store(1, Ordering::Release);
        let new_reset_after = now + tick.as_nanos() as i64;
        if self
            .reset_at
            .compare_exchange(reset_after, new_reset_after, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }
        1
    }
}

/// 32-bit FNV-1a
fn fnv32a(s: &str) -> u32 {
    const OFFSET: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;
    s.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ byte as u32).wrapping_mul(PRIME))
}

/// Sampler deciding whether each record is written
///
/// # Thread Safety
///
/// All counters are atomics; no lock is taken on the logging path.
pub struct LogSampler {
    config: SamplingConfig,
    counters: Vec<Counter>,
    started: Instant,
}

impl LogSampler {
    pub fn new(config: SamplingConfig) -> Self {
        let counters = (0..LogLevel::ALL.len() * COUNTERS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect();
        Self {
            config,
            counters,
            started: Instant::now(),
        }
    }

    /// Determine if a record should be written
    pub fn should_sample(&self, level: LogLevel, message: &str) -> bool {
        self.should_sample_at(level, message, self.started.elapsed())
    }

    pub(crate) fn should_sample_at(&self, level: LogLevel, message: &str, elapsed: Duration) -> bool {
        let slot = level as usize * COUNTERS_PER_LEVEL
            + (fnv32a(message) as usize % COUNTERS_PER_LEVEL);
        let n = self.counters[slot].inc_check_reset(elapsed.as_nanos() as i64, self.config.tick);

        if n <= self.config.initial {
            return true;
        }
        self.config.thereafter > 0 && (n - self.config.initial) % self.config.thereafter == 0
    }

    /// Get a reference to the sampling configuration
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }
}

impl std::fmt::Debug for LogSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSampler")
            .field("config", &self.config)
            .finish()
    }
}
