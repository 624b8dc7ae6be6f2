//! Process-wide default logger
//!
//! The default is published through an [`ArcSwap`], so every free function
//! reads it with a lock-free load. Only [`init`] takes a lock, and only to
//! serialize concurrent re-initializations. A call that loaded the previous
//! default finishes against it; the old engine is dropped (and its
//! destinations flushed) when the last such call releases it.
//!
//! If [`init`] is never called, the first read builds the default from
//! [`Options::new`] exactly once.
//!
//! ```
//! use rust_log_facade::{global, Options};
//!
//! global::init(Options {
//!     name: "worker".to_string(),
//!     level: "debug".to_string(),
//!     ..Options::new()
//! });
//!
//! global::info("started", &[]);
//! global::debugw("batch", &["size".into(), 64.into()]);
//! global::infoln(&[&"processed", &64, &"items"]);
//! ```

use crate::core::{Field, FieldValue, Logger, Options, Result, StructuredLogger};
use arc_swap::ArcSwap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt::{self, Display};
use std::sync::Arc;

static DEFAULT: OnceCell<ArcSwap<StructuredLogger>> = OnceCell::new();
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

fn slot() -> &'static ArcSwap<StructuredLogger> {
    DEFAULT.get_or_init(|| ArcSwap::from_pointee(StructuredLogger::new(Options::new())))
}

/// Build a logger from `options` and install it as the default
///
/// # Panics
///
/// When the logger cannot be built; the current default is left in place.
pub fn init(options: Options) {
    let logger = Arc::new(StructuredLogger::new(options));

    let _guard = INIT_LOCK.lock();
    match DEFAULT.get() {
        Some(current) => current.store(logger),
        None => {
            // Either installs `logger` or, if a first read won the race, replaces its result
            DEFAULT
                .get_or_init(|| ArcSwap::new(Arc::clone(&logger)))
                .store(logger);
        }
    }
}

/// Build a standalone logger; the default is not touched
///
/// # Panics
///
/// When the logger cannot be built.
pub fn new(options: Options) -> StructuredLogger {
    StructuredLogger::new(options)
}

/// Current default logger
pub fn default_logger() -> Arc<StructuredLogger> {
    slot().load_full()
}

/// Flush the current default's destinations
pub fn sync() -> Result<()> {
    slot().load().sync()
}

struct Joined<'a>(&'a [&'a dyn Display]);

impl Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

macro_rules! global_level {
    ($level:ident, $levelf:ident, $levelw:ident, $levelln:ident) => {
        #[track_caller]
        pub fn $level(msg: &str, fields: &[Field]) {
            slot().load().$level(msg, fields)
        }

        #[track_caller]
        pub fn $levelf(args: fmt::Arguments<'_>) {
            slot().load().$levelf(args)
        }

        #[track_caller]
        pub fn $levelw(msg: &str, keys_and_values: &[FieldValue]) {
            slot().load().$levelw(msg, keys_and_values)
        }

        /// Arguments are joined with a single space
        #[track_caller]
        pub fn $levelln(args: &[&dyn Display]) {
            slot().load().$levelf(format_args!("{}", Joined(args)))
        }
    };
}

macro_rules! global_terminal_level {
    ($level:ident, $levelf:ident, $levelw:ident, $levelln:ident) => {
        #[track_caller]
        pub fn $level(msg: &str, fields: &[Field]) -> ! {
            slot().load().$level(msg, fields)
        }

        #[track_caller]
        pub fn $levelf(args: fmt::Arguments<'_>) -> ! {
            slot().load().$levelf(args)
        }

        #[track_caller]
        pub fn $levelw(msg: &str, keys_and_values: &[FieldValue]) -> ! {
            slot().load().$levelw(msg, keys_and_values)
        }

        /// Arguments are joined with a single space
        #[track_caller]
        pub fn $levelln(args: &[&dyn Display]) -> ! {
            slot().load().$levelf(format_args!("{}", Joined(args)))
        }
    };
}

global_level!(debug, debugf, debugw, debugln);
global_level!(info, infof, infow, infoln);
global_level!(warn, warnf, warnw, warnln);
global_level!(error, errorf, errorw, errorln);
global_terminal_level!(panic, panicf, panicw, panicln);
global_terminal_level!(fatal, fatalf, fatalw, fatalln);
