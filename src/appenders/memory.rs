//! In-memory appender
//!
//! Captures encoded records in a shared buffer. Useful for inspecting output
//! in tests or for forwarding records to a custom surface.

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared view of the records captured by a [`MemoryAppender`]
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryBuffer {
    /// Snapshot of captured records, line endings included
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Captured records parsed as JSON; lines that are not JSON are skipped
    pub fn json_records(&self) -> Vec<serde_json::Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryAppender {
    buffer: MemoryBuffer,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.buffer.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
