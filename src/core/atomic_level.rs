//! Runtime-adjustable severity threshold

use super::log_level::LogLevel;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Shared severity threshold
///
/// Clones share the same underlying value, so a level change made through
/// one handle is seen by every engine built with it.
///
/// # Example
///
/// ```
/// use rust_log_facade::{AtomicLevel, LogLevel};
///
/// let level = AtomicLevel::new(LogLevel::Info);
/// assert!(!level.enabled(LogLevel::Debug));
///
/// level.set_level(LogLevel::Debug);
/// assert!(level.enabled(LogLevel::Debug));
/// ```
#[derive(Clone)]
pub struct AtomicLevel {
    level: Arc<AtomicU8>,
}

impl AtomicLevel {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` passes the threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.level()).finish()
    }
}
