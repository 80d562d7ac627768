//! Console logger implementation

use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io::{self, IsTerminal, Write};

use crossterm::queue;
use crossterm::style::{ResetColor, SetForegroundColor};

use super::error::LogResult;
use super::traits::{describe_error, Logger};
use super::types::{ConsoleColor, Severity, SinkKind};

/// Palette index the first severity starts from
const COLOR_START: usize = 9;

/// Number of palette entries after the sentinel
const COLOR_CYCLE: usize = 15;

/// Default severity colors
///
/// Severities take consecutive palette entries in declaration order, starting
/// at `(9 % 15) + 1` and wrapping within entries 1..=15 so the `Black`
/// sentinel is never used.
pub fn default_severity_colors() -> BTreeMap<Severity, ConsoleColor> {
    Severity::ALL
        .into_iter()
        .enumerate()
        .map(|(i, severity)| {
            let index = ((COLOR_START + i) % COLOR_CYCLE) + 1;
            (severity, ConsoleColor::PALETTE[index])
        })
        .collect()
}

/// A logger that writes formatted lines to stdout, optionally color-coded
pub struct ConsoleLogger {
    timestamp_enabled: bool,
    color_enabled: bool,
    severity_colors: BTreeMap<Severity, ConsoleColor>,
    out: Box<dyn Write + Send>,
    /// Whether the target understands color escape sequences
    ansi: bool,
}

impl fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("timestamp_enabled", &self.timestamp_enabled)
            .field("color_enabled", &self.color_enabled)
            .field("severity_colors", &self.severity_colors)
            .field("ansi", &self.ansi)
            .finish()
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger writing to stdout, with timestamps and colors on
    ///
    /// When stdout is redirected to a file or pipe no escape sequences are
    /// written, even with colors enabled.
    pub fn new() -> Self {
        let stdout = io::stdout();
        let ansi = stdout.is_terminal();
        Self::with_target(stdout, ansi)
    }

    /// Create a console logger writing to a custom target that renders colors
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self::with_target(out, true)
    }

    /// Create a console logger writing to `out`; `ansi` says whether the
    /// target renders color escape sequences
    pub fn with_target(out: impl Write + Send + 'static, ansi: bool) -> Self {
        Self {
            timestamp_enabled: true,
            color_enabled: true,
            severity_colors: default_severity_colors(),
            out: Box::new(out),
            ansi,
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Enable or disable colors; the terminal color is reset either way
    pub fn set_color_enabled(&mut self, enabled: bool) -> LogResult<()> {
        self.color_enabled = enabled;
        if self.ansi {
            queue!(self.out, ResetColor)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Copy of the current severity to color map
    pub fn severity_colors(&self) -> BTreeMap<Severity, ConsoleColor> {
        self.severity_colors.clone()
    }

    pub fn severity_color(&self, severity: Severity) -> Option<ConsoleColor> {
        self.severity_colors.get(&severity).copied()
    }

    /// Merge colors into the map
    ///
    /// Severities present in `colors` are replaced; every other severity keeps
    /// its current color.
    pub fn update_severity_colors<I>(&mut self, colors: I)
    where
        I: IntoIterator<Item = (Severity, ConsoleColor)>,
    {
        for (severity, color) in colors {
            self.severity_colors.insert(severity, color);
        }
    }

    pub fn set_severity_color(&mut self, severity: Severity, color: ConsoleColor) {
        self.update_severity_colors([(severity, color)]);
    }

    /// Print `text` (already newline-terminated) inside the severity's color span
    ///
    /// The color is reset even when printing fails; the first error is returned.
    fn emit(&mut self, severity: Severity, text: &str) -> LogResult<()> {
        let colored = self.color_enabled && self.ansi;
        if colored {
            if let Some(color) = self.severity_color(severity) {
                queue!(self.out, SetForegroundColor(color.into()))?;
            }
        }

        let written = self.out.write_all(text.as_bytes());
        let reset = if colored { queue!(self.out, ResetColor) } else { Ok(()) };
        let flushed = self.out.flush();

        written?;
        reset?;
        flushed?;
        Ok(())
    }
}

impl Logger for ConsoleLogger {
    fn kind(&self) -> SinkKind {
        SinkKind::ConsoleLog
    }

    fn timestamp_enabled(&self) -> bool {
        self.timestamp_enabled
    }

    fn set_timestamp_enabled(&mut self, enabled: bool) {
        self.timestamp_enabled = enabled;
    }

    fn write_as(&mut self, message: &str, severity: Severity) -> LogResult<()> {
        let line = self.format_message(message, severity);
        self.emit(severity, &format!("{}\n", line))
    }

    fn write_error(&mut self, message: &str, severity: Severity, error: &dyn Error) -> LogResult<()> {
        let line = self.format_message(message, severity);
        self.emit(severity, &format!("{}\n{}\n", line, describe_error(error)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
