//! Pluggable loggers
//!
//! - `Logger` trait shared by every sink
//! - Built-in sinks: `ConsoleLogger`, `FileLogger`
//! - A registry for creating sinks by `SinkKind`

mod types;
mod error;
mod traits;
mod console;
pub mod file_logger;
mod factory;

pub use types::{Severity, SinkKind, ConsoleColor};
pub use error::{LogError, LogResult};
pub use traits::{
    Logger, BoxedLogger, SharedLogger,
    shared, format_message, describe_error, LINE_TIMESTAMP_FORMAT,
};
pub use console::{ConsoleLogger, default_severity_colors};
pub use file_logger::FileLogger;
pub use factory::{
    LoggerRegistry, LoggerDefinition, LoggerConstructor,
    create_logger, create_logger_by_name, register_logger, list_loggers,
};
