//! Logger registry for creating sinks by kind

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::console::ConsoleLogger;
use super::error::{LogError, LogResult};
use super::file_logger::FileLogger;
use super::traits::BoxedLogger;
use super::types::SinkKind;

/// Constructor function type for creating loggers
pub type LoggerConstructor = Box<dyn Fn() -> BoxedLogger + Send + Sync>;

/// Definition of a registered logger
pub struct LoggerDefinition {
    pub kind: SinkKind,
    /// Human-readable description
    pub description: String,
    pub constructor: LoggerConstructor,
}

impl std::fmt::Debug for LoggerDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerDefinition")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish()
    }
}

/// Explicit mapping from sink kind to constructor
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    definitions: BTreeMap<SinkKind, LoggerDefinition>,
}

impl LoggerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the console and file loggers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(
            SinkKind::ConsoleLog,
            "Write to stdout, color-coded per severity",
            Box::new(|| -> BoxedLogger { Box::new(ConsoleLogger::new()) }),
        );

        registry.register(
            SinkKind::FileLog,
            "Append to a timestamped file in the configured directory",
            Box::new(|| -> BoxedLogger { Box::new(FileLogger::new()) }),
        );

        registry
    }

    /// Register a constructor, replacing any previous one for `kind`
    pub fn register(&mut self, kind: SinkKind, description: &str, constructor: LoggerConstructor) {
        self.definitions.insert(
            kind,
            LoggerDefinition {
                kind,
                description: description.to_string(),
                constructor,
            },
        );
    }

    /// Remove the constructor for `kind`
    pub fn unregister(&mut self, kind: SinkKind) -> bool {
        self.definitions.remove(&kind).is_some()
    }

    pub fn contains(&self, kind: SinkKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    /// Create a logger with default settings
    ///
    /// Returns `LogError::UnsupportedKind` if nothing is registered for `kind`.
    pub fn create(&self, kind: SinkKind) -> LogResult<BoxedLogger> {
        match self.definitions.get(&kind) {
            Some(definition) => Ok((definition.constructor)()),
            None => {
                tracing::debug!(%kind, "No logger registered");
                Err(LogError::UnsupportedKind(kind.to_string()))
            }
        }
    }

    /// List registered loggers as (kind, description) pairs
    pub fn list(&self) -> Vec<(SinkKind, String)> {
        self.definitions
            .values()
            .map(|def| (def.kind, def.description.clone()))
            .collect()
    }
}

/// Global registry of loggers
static REGISTRY: Lazy<RwLock<LoggerRegistry>> = Lazy::new(|| RwLock::new(LoggerRegistry::with_builtins()));

/// Create a logger by kind
///
/// # Example
///
/// ```
/// use sinklog_core::logging::{create_logger, Severity, SinkKind};
///
/// let mut logger = create_logger(SinkKind::ConsoleLog).unwrap();
/// logger.write_as("service started", Severity::Info).unwrap();
/// ```
pub fn create_logger(kind: SinkKind) -> LogResult<BoxedLogger> {
    REGISTRY.read().create(kind)
}

/// Create a logger from a kind name such as `"FileLog"` or `"console"`
pub fn create_logger_by_name(name: &str) -> LogResult<BoxedLogger> {
    create_logger(name.parse()?)
}

/// Replace the constructor used by [`create_logger`] for `kind`
pub fn register_logger(kind: SinkKind, description: &str, constructor: LoggerConstructor) {
    REGISTRY.write().register(kind, description, constructor);
}

/// List all registered loggers
pub fn list_loggers() -> Vec<(SinkKind, String)> {
    REGISTRY.read().list()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{FileLogger, Logger, Severity};
    use tempfile::TempDir;

    #[test]
    fn test_builtin_loggers_registered() {
        let registry = LoggerRegistry::with_builtins();
        assert!(registry.contains(SinkKind::ConsoleLog));
        assert!(registry.contains(SinkKind::FileLog));
    }

    #[test]
    fn test_create_console_logger() {
        let logger = create_logger(SinkKind::ConsoleLog).unwrap();
        assert_eq!(logger.kind(), SinkKind::ConsoleLog);
        assert!(logger.timestamp_enabled());
    }

    #[test]
    fn test_create_file_logger() {
        let logger = create_logger(SinkKind::FileLog).unwrap();
        assert_eq!(logger.kind(), SinkKind::FileLog);

        let file = logger.downcast_ref::<FileLogger>().unwrap();
        assert_eq!(file.base_name(), "Log");
        assert!(file.current_path().is_none());
    }

    #[test]
    fn test_created_loggers_accept_writes() {
        let dir = TempDir::new().unwrap();
        let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");

        for kind in SinkKind::ALL {
            let mut logger = create_logger(kind).unwrap();
            if let Some(file) = logger.downcast_mut::<FileLogger>() {
                file.set_directory(dir.path()).unwrap();
            }

            logger.write("plain").unwrap();
            logger.write_as("leveled", Severity::Debug).unwrap();
            logger.write_error("failed", Severity::Error, &error).unwrap();
        }
    }

    #[test]
    fn test_default_file_logger_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut logger = create_logger(SinkKind::FileLog).unwrap();
        logger.downcast_mut::<FileLogger>().unwrap().set_directory(dir.path()).unwrap();

        logger.write_as("hello", Severity::Warn).unwrap();

        let path = logger.downcast_ref::<FileLogger>().unwrap().current_path().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Log_"));
        assert!(name.ends_with(".log"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.lines().next().unwrap().ends_with("[WARN] - hello"));
    }

    #[test]
    fn test_create_unregistered_kind() {
        let mut registry = LoggerRegistry::with_builtins();
        assert!(registry.unregister(SinkKind::FileLog));
        assert!(!registry.unregister(SinkKind::FileLog));

        match registry.create(SinkKind::FileLog) {
            Err(LogError::UnsupportedKind(name)) => assert_eq!(name, "FileLog"),
            Err(other) => panic!("expected UnsupportedKind, got {:?}", other),
            Ok(_) => panic!("expected UnsupportedKind"),
        }
    }

    #[test]
    fn test_create_by_name() {
        let logger = create_logger_by_name("file").unwrap();
        assert_eq!(logger.kind(), SinkKind::FileLog);

        assert!(matches!(
            create_logger_by_name("EventLog"),
            Err(LogError::UnsupportedKind(_))
        ));
    }

    #[test]
    fn test_register_custom_constructor() {
        let mut registry = LoggerRegistry::new();
        registry.register(
            SinkKind::ConsoleLog,
            "Quiet console",
            Box::new(|| -> BoxedLogger {
                let mut logger = crate::logging::ConsoleLogger::with_writer(std::io::sink());
                logger.set_timestamp_enabled(false);
                Box::new(logger)
            }),
        );

        let logger = registry.create(SinkKind::ConsoleLog).unwrap();
        assert!(!logger.timestamp_enabled());
        assert_eq!(registry.list(), vec![(SinkKind::ConsoleLog, "Quiet console".to_string())]);
    }

    #[test]
    fn test_register_global_logger() {
        register_logger(
            SinkKind::ConsoleLog,
            "Write to stdout, color-coded per severity",
            Box::new(|| -> BoxedLogger { Box::new(ConsoleLogger::new()) }),
        );

        let logger = create_logger(SinkKind::ConsoleLog).unwrap();
        assert!(logger.downcast_ref::<ConsoleLogger>().is_some());
    }

    #[test]
    fn test_list_loggers() {
        let kinds: Vec<SinkKind> = list_loggers().into_iter().map(|(kind, _)| kind).collect();
        assert!(kinds.contains(&SinkKind::ConsoleLog));
        assert!(kinds.contains(&SinkKind::FileLog));
    }
}
