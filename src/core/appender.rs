//! Appender trait for log output destinations

use super::error::Result;

/// A destination receiving fully encoded records
///
/// Each call to `append` carries exactly one record, line ending included.
/// The engine serializes calls per appender, so implementations never see
/// two records interleaved.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
