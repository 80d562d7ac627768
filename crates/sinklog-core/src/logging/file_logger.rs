//! File logger implementation
//!
//! Lines are appended to `<directory>/<base_name>_<timestamp><extension>`.
//! The file is opened on the first write and kept open until the logger's
//! identity (directory or base name) changes, the size limit forces a new
//! file, or the logger is closed.

use std::any::Any;
use std::error::Error;
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{LogError, LogResult};
use super::traits::{describe_error, Logger};
use super::types::{Severity, SinkKind};

pub const DEFAULT_MAX_SIZE: u64 = 1_048_576;
pub const DEFAULT_BASE_NAME: &str = "Log";
pub const DEFAULT_EXTENSION: &str = ".log";

/// Date and time part of the round-trip file name timestamp
const ROUND_TRIP_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Offset part of the round-trip file name timestamp
const ROUND_TRIP_OFFSET: &str = "%:z";

/// Render `now` as a round-trip timestamp with a 7-digit fraction
///
/// e.g. `2016-05-01T13:45:30.1234567+02:00`
pub fn round_trip_timestamp(now: &DateTime<Local>) -> String {
    format!(
        "{}.{:07}{}",
        now.format(ROUND_TRIP_DATE_TIME),
        now.timestamp_subsec_nanos() % 1_000_000_000 / 100,
        now.format(ROUND_TRIP_OFFSET)
    )
}

static BASE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z0-9]*$").expect("base name pattern is valid"));

/// Lifecycle of the underlying file handle
#[derive(Debug)]
enum HandleState {
    /// No file open yet; the next write opens one
    Unopened,
    Open(OpenFile),
    /// Closed for good; writes fail
    Closed,
}

#[derive(Debug)]
struct OpenFile {
    file: File,
    path: PathBuf,
    /// Bytes in the file, including whatever it held when opened
    len: u64,
}

/// A logger that appends formatted lines to a timestamped file
#[derive(Debug)]
pub struct FileLogger {
    timestamp_enabled: bool,
    size_limit_enabled: bool,
    max_size: u64,
    directory: PathBuf,
    base_name: String,
    extension: String,
    /// strftime layout for the file name timestamp; round-trip when unset
    timestamp_format: Option<String>,
    state: HandleState,
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLogger {
    /// Create a file logger with default settings; no file is opened yet
    pub fn new() -> Self {
        Self {
            timestamp_enabled: true,
            size_limit_enabled: true,
            max_size: DEFAULT_MAX_SIZE,
            directory: PathBuf::from("."),
            base_name: DEFAULT_BASE_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            timestamp_format: None,
            state: HandleState::Unopened,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Set the directory new log files are created in
    ///
    /// Fails with `InvalidArgument` if `directory` is not an existing
    /// directory. On success any open file is closed.
    pub fn set_directory(&mut self, directory: impl AsRef<Path>) -> LogResult<()> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(LogError::invalid_argument(format!(
                "The specified directory does not exist: {}",
                directory.display()
            )));
        }

        self.directory = directory.to_path_buf();
        self.invalidate();
        Ok(())
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Set the file name prefix; letters and digits only
    ///
    /// On success any open file is closed.
    pub fn set_base_name(&mut self, base_name: &str) -> LogResult<()> {
        if !BASE_NAME_PATTERN.is_match(base_name) {
            return Err(LogError::invalid_argument(format!(
                "The file name contains special characters or spaces: {:?}",
                base_name
            )));
        }

        self.base_name = base_name.to_string();
        self.invalidate();
        Ok(())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Custom file name timestamp layout, `None` for the round-trip default
    pub fn timestamp_format(&self) -> Option<&str> {
        self.timestamp_format.as_deref()
    }

    /// Go back to the round-trip file name timestamp
    pub fn reset_timestamp_format(&mut self) {
        self.timestamp_format = None;
    }

    /// Set the strftime layout used for the file name timestamp
    ///
    /// Takes effect the next time a file is opened.
    pub fn set_timestamp_format(&mut self, format: &str) -> LogResult<()> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(LogError::invalid_argument(format!(
                "Invalid timestamp format: {:?}",
                format
            )));
        }
        self.timestamp_format = Some(format.to_string());
        Ok(())
    }

    pub fn size_limit_enabled(&self) -> bool {
        self.size_limit_enabled
    }

    pub fn set_size_limit_enabled(&mut self, enabled: bool) {
        self.size_limit_enabled = enabled;
    }

    /// Maximum size of one log file in bytes
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn set_max_size(&mut self, max_size: u64) {
        self.max_size = max_size;
    }

    /// Path of the currently open file, if any
    pub fn current_path(&self) -> Option<&Path> {
        match &self.state {
            HandleState::Open(open) => Some(&open.path),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, HandleState::Closed)
    }

    /// Release the file handle; later writes fail with `LogError::Closed`
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if let HandleState::Open(open) = std::mem::replace(&mut self.state, HandleState::Closed) {
            tracing::debug!(path = %open.path.display(), "Closed log file");
        }
    }

    /// Drop the open handle so the next write reopens under the current identity
    fn invalidate(&mut self) {
        if let HandleState::Open(open) = &self.state {
            tracing::debug!(path = %open.path.display(), "Log file identity changed, closing handle");
            self.state = HandleState::Unopened;
        }
    }

    /// Build the full path of a new log file for `now`
    fn file_path(&self, now: &DateTime<Local>) -> LogResult<PathBuf> {
        let mut stamp = match &self.timestamp_format {
            None => round_trip_timestamp(now),
            Some(format) => {
                let mut stamp = String::new();
                write!(stamp, "{}", now.format(format)).map_err(|_| {
                    LogError::invalid_argument(format!("Invalid timestamp format: {:?}", format))
                })?;
                stamp
            }
        };
        stamp.retain(|c| !matches!(c, ':' | '-' | '.'));

        Ok(self
            .directory
            .join(format!("{}_{}{}", self.base_name, stamp, self.extension)))
    }

    fn open(&self, previous: Option<&Path>) -> LogResult<OpenFile> {
        let mut path = self.file_path(&Local::now())?;

        // A rotation within the same timestamp tick must not reopen the full file
        if let Some(previous) = previous {
            let mut sequence = 1;
            let base = path.clone();
            while path == previous || path.exists() {
                let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                path = base.with_file_name(format!("{}_{}{}", stem, sequence, self.extension));
                sequence += 1;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let len = file.metadata()?.len();
        tracing::debug!(path = %path.display(), len, "Opened log file");

        Ok(OpenFile { file, path, len })
    }

    /// Return the open file, opening or rotating as needed for a payload of `incoming` bytes
    fn file_for(&mut self, incoming: u64) -> LogResult<&mut OpenFile> {
        match &self.state {
            HandleState::Closed => return Err(LogError::Closed),
            HandleState::Unopened => {
                let open = self.open(None)?;
                self.state = HandleState::Open(open);
            }
            HandleState::Open(open) => {
                let over_limit = self.size_limit_enabled
                    && open.len > 0
                    && open.len.saturating_add(incoming) > self.max_size;
                if over_limit {
                    let rotated = self.open(Some(&open.path))?;
                    tracing::debug!(
                        from = %open.path.display(),
                        to = %rotated.path.display(),
                        "Rotating log file"
                    );
                    self.state = HandleState::Open(rotated);
                }
            }
        }

        match &mut self.state {
            HandleState::Open(open) => Ok(open),
            _ => Err(LogError::Closed),
        }
    }

    /// Append `text` in a single write and flush
    fn append(&mut self, text: &str) -> LogResult<()> {
        let bytes = text.as_bytes();
        let open = self.file_for(bytes.len() as u64)?;
        open.file.write_all(bytes)?;
        open.file.flush()?;
        open.len += bytes.len() as u64;
        Ok(())
    }
}

impl Logger for FileLogger {
    fn kind(&self) -> SinkKind {
        SinkKind::FileLog
    }

    fn timestamp_enabled(&self) -> bool {
        self.timestamp_enabled
    }

    fn set_timestamp_enabled(&mut self, enabled: bool) {
        self.timestamp_enabled = enabled;
    }

    fn write_as(&mut self, message: &str, severity: Severity) -> LogResult<()> {
        let line = self.format_message(message, severity);
        self.append(&format!("{}\n", line))
    }

    fn write_error(&mut self, message: &str, severity: Severity, error: &dyn Error) -> LogResult<()> {
        let line = self.format_message(message, severity);
        self.append(&format!("{}\n{}\n", line, describe_error(error)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
