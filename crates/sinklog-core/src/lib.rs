//! Sinklog Core
//!
//! Pluggable, synchronous loggers. Every sink formats lines the same way
//! (`[<time>] [<SEVERITY>] - <message>`) and differs only in where the line goes:
//!
//! - `ConsoleLogger`: stdout, color-coded per severity
//! - `FileLogger`: a timestamped file, opened lazily and rotated by size
//!
//! Sinks are created by kind through the registry, so callers only depend on
//! the `Logger` trait:
//!
//! ```rust,no_run
//! use sinklog_core::{create_logger, FileLogger, Severity, SinkKind};
//!
//! let mut logger = create_logger(SinkKind::FileLog)?;
//! if let Some(file) = logger.downcast_mut::<FileLogger>() {
//!     file.set_directory("/var/log/myapp")?;
//!     file.set_base_name("MyApp")?;
//! }
//! logger.write_as("service started", Severity::Info)?;
//! # Ok::<(), sinklog_core::LogError>(())
//! ```
//!
//! Loggers write inline on the calling thread and take `&mut self`; wrap one
//! in a `SharedLogger` to use it from several threads.

pub mod logging;
pub mod config;

// Re-export commonly used types
pub use logging::{
    Logger, BoxedLogger, SharedLogger, shared,
    Severity, SinkKind, ConsoleColor,
    LogError, LogResult,
    ConsoleLogger, FileLogger,
    LoggerRegistry, create_logger, create_logger_by_name, list_loggers,
};

pub use config::{LoggerConfig, ConsoleSettings, FileSettings};
