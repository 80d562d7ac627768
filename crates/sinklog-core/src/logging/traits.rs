//! Logger trait definition

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use parking_lot::Mutex;

use super::error::LogResult;
use super::types::{Severity, SinkKind};

/// Timestamp layout used inside formatted lines
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logger abstraction shared by every sink
///
/// Implementations:
/// - `ConsoleLogger`: Writes to stdout, color-coded per severity
/// - `FileLogger`: Appends to a timestamped file
///
/// Writes take `&mut self`; share an instance across threads through
/// [`SharedLogger`].
pub trait Logger: Send {
    /// The sink kind this logger delivers to
    fn kind(&self) -> SinkKind;

    /// Whether formatted lines carry a timestamp
    fn timestamp_enabled(&self) -> bool;

    /// Toggle timestamps; affects subsequent writes only
    fn set_timestamp_enabled(&mut self, enabled: bool);

    /// Format and deliver a message with the given severity
    fn write_as(&mut self, message: &str, severity: Severity) -> LogResult<()>;

    /// Deliver a message followed by a line describing `error`
    fn write_error(&mut self, message: &str, severity: Severity, error: &dyn Error) -> LogResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Log an info message
    fn write(&mut self, message: &str) -> LogResult<()> {
        self.write_as(message, Severity::Info)
    }

    /// Format a message against the current local time
    fn format_message(&self, message: &str, severity: Severity) -> String {
        format_message(message, severity, self.timestamp_enabled(), &Local::now())
    }
}

impl dyn Logger {
    /// Borrow the concrete sink behind a `dyn Logger`
    pub fn downcast_ref<T: Logger + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the concrete sink behind a `dyn Logger`
    ///
    /// ```
    /// use sinklog_core::logging::{create_logger, FileLogger, SinkKind};
    ///
    /// let mut logger = create_logger(SinkKind::FileLog).unwrap();
    /// let file = logger.downcast_mut::<FileLogger>().unwrap();
    /// file.set_base_name("Audit").unwrap();
    /// ```
    pub fn downcast_mut<T: Logger + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Type alias for a boxed logger
pub type BoxedLogger = Box<dyn Logger>;

/// A logger guarded by a mutex so several threads can write to it
pub type SharedLogger = Arc<Mutex<BoxedLogger>>;

/// Wrap a logger for use from multiple threads
pub fn shared(logger: BoxedLogger) -> SharedLogger {
    Arc::new(Mutex::new(logger))
}

/// Build a formatted line: `[<time>] [<SEVERITY>] - <message>`
///
/// The time segment is only present when `timestamp_enabled` is set.
pub fn format_message<Tz>(
    message: &str,
    severity: Severity,
    timestamp_enabled: bool,
    now: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if timestamp_enabled {
        format!("[{}] [{}] - {}", now.format(LINE_TIMESTAMP_FORMAT), severity, message)
    } else {
        format!("[{}] - {}", severity, message)
    }
}

/// Render an error and its chain of sources on one line
pub fn describe_error(error: &dyn Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
