//! Appender implementations and destination resolution

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
pub use memory::{MemoryAppender, MemoryBuffer};

// Re-export trait for convenience
pub use crate::core::Appender;

use crate::core::{LoggerError, Result};

/// Open the destination named by `path`
///
/// `stdout` and `stderr` select the standard streams. `file://` URLs and
/// plain paths open (or create) a file in append mode.
pub fn open(path: &str) -> Result<Box<dyn Appender>> {
    match path {
        "stdout" => Ok(Box::new(ConsoleAppender::stdout())),
        "stderr" => Ok(Box::new(ConsoleAppender::stderr())),
        "" => Err(LoggerError::config("appenders", "empty destination path")),
        other => {
            let file_path = other.strip_prefix("file://").unwrap_or(other);
            Ok(Box::new(FileAppender::new(file_path)?))
        }
    }
}

/// Open every destination, failing on the first one that cannot be opened
pub fn open_all<S: AsRef<str>>(paths: &[S]) -> Result<Vec<Box<dyn Appender>>> {
    paths.iter().map(|path| open(path.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_standard_streams() {
        assert_eq!(open("stdout").unwrap().name(), "stdout");
        assert_eq!(open("stderr").unwrap().name(), "stderr");
    }

    #[test]
    fn test_open_file_url_and_path() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.log");
        let url = dir.path().join("url.log");

        open(plain.to_str().unwrap()).unwrap();
        open(&format!("file://{}", url.display())).unwrap();

        assert!(plain.exists());
        assert!(url.exists());
    }

    #[test]
    fn test_open_rejects_empty_and_missing() {
        assert!(matches!(
            open(""),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope").join("app.log");
        assert!(open_all(&["stdout", missing.to_str().unwrap()]).is_err());
    }
}
