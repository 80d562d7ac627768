//! YAML logger configuration

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::file_logger::DEFAULT_MAX_SIZE;
use crate::logging::{
    create_logger, BoxedLogger, ConsoleColor, ConsoleLogger, FileLogger, LogError, LogResult,
    Severity, SinkKind,
};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Sink to create
    pub kind: SinkKind,

    /// Prefix lines with the local time
    pub timestamps: bool,

    /// Settings applied when `kind` is `console`
    pub console: ConsoleSettings,

    /// Settings applied when `kind` is `file`
    pub file: FileSettings,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::ConsoleLog,
            timestamps: true,
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

/// Console sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub color: bool,

    /// Colors merged over the defaults; unlisted severities keep theirs
    pub colors: BTreeMap<Severity, ConsoleColor>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            color: true,
            colors: BTreeMap::new(),
        }
    }
}

impl ConsoleSettings {
    fn apply(&self, logger: &mut ConsoleLogger) -> LogResult<()> {
        if logger.color_enabled() != self.color {
            logger.set_color_enabled(self.color)?;
        }
        logger.update_severity_colors(self.colors.clone());
        Ok(())
    }
}

/// File sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Existing directory for log files (defaults to the working directory)
    pub directory: Option<PathBuf>,

    /// Alphanumeric file name prefix (defaults to `Log`)
    pub base_name: Option<String>,

    /// strftime layout for the file name timestamp
    pub timestamp_format: Option<String>,

    pub size_limit_enabled: bool,

    /// Bytes per file before a new one is started
    pub max_size: u64,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            directory: None,
            base_name: None,
            timestamp_format: None,
            size_limit_enabled: true,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl FileSettings {
    fn apply(&self, logger: &mut FileLogger) -> LogResult<()> {
        if let Some(directory) = &self.directory {
            logger.set_directory(directory)?;
        }
        if let Some(base_name) = &self.base_name {
            logger.set_base_name(base_name)?;
        }
        if let Some(format) = &self.timestamp_format {
            logger.set_timestamp_format(format)?;
        }
        logger.set_size_limit_enabled(self.size_limit_enabled);
        logger.set_max_size(self.max_size);
        Ok(())
    }
}

impl LoggerConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> LogResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| LogError::Config(format!("Failed to parse YAML: {}", e)))
    }

    /// Load config from file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No logger config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> LogResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LogError::Config(format!("Failed to serialize YAML: {}", e)))
    }

    /// Create the configured logger through the global registry
    ///
    /// Settings go through the sinks' validating setters, so a bad directory
    /// or base name fails with `LogError::InvalidArgument`.
    pub fn build(&self) -> LogResult<BoxedLogger> {
        let mut logger = create_logger(self.kind)?;
        logger.set_timestamp_enabled(self.timestamps);

        if let Some(console) = logger.downcast_mut::<ConsoleLogger>() {
            self.console.apply(console)?;
        }
        if let Some(file) = logger.downcast_mut::<FileLogger>() {
            self.file.apply(file)?;
        }

        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Logger;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.kind, SinkKind::ConsoleLog);
        assert!(config.timestamps);
        assert_eq!(config.file.max_size, 1_048_576);
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
kind: file
timestamps: false
console:
  color: false
  colors:
    error: red
    warn: dark_yellow
file:
  directory: /tmp
  base_name: Service
  size_limit_enabled: false
  max_size: 2048
"#;
        let config = LoggerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.kind, SinkKind::FileLog);
        assert!(!config.timestamps);
        assert!(!config.console.color);
        assert_eq!(config.console.colors[&Severity::Error], ConsoleColor::Red);
        assert_eq!(config.console.colors[&Severity::Warn], ConsoleColor::DarkYellow);
        assert_eq!(config.file.directory, Some(PathBuf::from("/tmp")));
        assert_eq!(config.file.base_name.as_deref(), Some("Service"));
        assert!(!config.file.size_limit_enabled);
        assert_eq!(config.file.max_size, 2048);
    }

    #[test]
    fn test_kind_accepts_identifier() {
        let config = LoggerConfig::from_yaml_str("kind: FileLog").unwrap();
        assert_eq!(config.kind, SinkKind::FileLog);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = LoggerConfig::from_yaml_str("kind: syslog");
        assert!(matches!(result, Err(LogError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::load(dir.path().join("logging.yaml")).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logging.yaml");

        let mut config = LoggerConfig::default();
        config.kind = SinkKind::FileLog;
        config.file.base_name = Some("Nightly".to_string());
        fs::write(&path, config.to_yaml_string().unwrap()).unwrap();

        assert_eq!(LoggerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_build_file_logger() {
        let dir = TempDir::new().unwrap();
        let mut config = LoggerConfig::default();
        config.kind = SinkKind::FileLog;
        config.timestamps = false;
        config.file.directory = Some(dir.path().to_path_buf());
        config.file.base_name = Some("Build".to_string());

        let mut logger = config.build().unwrap();
        logger.write_as("configured", Severity::Trace).unwrap();

        let file = logger.downcast_ref::<FileLogger>().unwrap();
        let path = file.current_path().unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("Build_"));
        assert_eq!(fs::read_to_string(path).unwrap(), "[TRACE] - configured\n");
    }

    #[test]
    fn test_build_console_logger_merges_colors() {
        let yaml = r#"
kind: console
console:
  colors:
    info: blue
"#;
        let logger = LoggerConfig::from_yaml_str(yaml).unwrap().build().unwrap();
        let console = logger.downcast_ref::<ConsoleLogger>().unwrap();

        assert!(console.color_enabled());
        assert_eq!(console.severity_color(Severity::Info), Some(ConsoleColor::Blue));
        assert_eq!(console.severity_color(Severity::Trace), Some(ConsoleColor::Cyan));
    }

    #[test]
    fn test_build_rejects_bad_base_name() {
        let mut config = LoggerConfig::default();
        config.kind = SinkKind::FileLog;
        config.file.base_name = Some("bad name!".to_string());

        assert!(matches!(config.build(), Err(LogError::InvalidArgument(_))));
    }
}
