//! Severity, sink kind and console palette enumerations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LogError;

/// Severity attached to a log message
///
/// The declaration order is used for display (and for assigning default
/// console colors), never for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Trace,
    Debug,
    Error,
    Fatal,
    Warn,
}

impl Severity {
    /// All severities in declaration order
    pub const ALL: [Severity; 6] = [
        Severity::Info,
        Severity::Trace,
        Severity::Debug,
        Severity::Error,
        Severity::Fatal,
        Severity::Warn,
    ];

    /// Upper-cased tag used in formatted lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Warn => "WARN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogError::invalid_argument(format!("Unknown severity: {}", s)))
    }
}

/// The sink a logger delivers to; the factory's only selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SinkKind {
    #[serde(rename = "console", alias = "ConsoleLog")]
    ConsoleLog,
    #[serde(rename = "file", alias = "FileLog")]
    FileLog,
}

impl SinkKind {
    pub const ALL: [SinkKind; 2] = [SinkKind::ConsoleLog, SinkKind::FileLog];

    /// Identifier of the sink kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::ConsoleLog => "ConsoleLog",
            SinkKind::FileLog => "FileLog",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            SinkKind::ConsoleLog => "console",
            SinkKind::FileLog => "file",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = LogError;

    /// Accepts the identifier (`ConsoleLog`) or its alias (`console`), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SinkKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s) || kind.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogError::UnsupportedKind(s.to_string()))
    }
}

/// Console foreground colors, in console palette order
///
/// `Black` sits at index 0 and doubles as the "no color" sentinel, so default
/// assignments never pick it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    pub const PALETTE: [ConsoleColor; 16] = [
        ConsoleColor::Black,
        ConsoleColor::DarkBlue,
        ConsoleColor::DarkGreen,
        ConsoleColor::DarkCyan,
        ConsoleColor::DarkRed,
        ConsoleColor::DarkMagenta,
        ConsoleColor::DarkYellow,
        ConsoleColor::Gray,
        ConsoleColor::DarkGray,
        ConsoleColor::Blue,
        ConsoleColor::Green,
        ConsoleColor::Cyan,
        ConsoleColor::Red,
        ConsoleColor::Magenta,
        ConsoleColor::Yellow,
        ConsoleColor::White,
    ];
}

impl From<ConsoleColor> for crossterm::style::Color {
    fn from(color: ConsoleColor) -> Self {
        use crossterm::style::Color;

        match color {
            ConsoleColor::Black => Color::Black,
            ConsoleColor::DarkBlue => Color::DarkBlue,
            ConsoleColor::DarkGreen => Color::DarkGreen,
            ConsoleColor::DarkCyan => Color::DarkCyan,
            ConsoleColor::DarkRed => Color::DarkRed,
            ConsoleColor::DarkMagenta => Color::DarkMagenta,
            ConsoleColor::DarkYellow => Color::DarkYellow,
            ConsoleColor::Gray => Color::Grey,
            ConsoleColor::DarkGray => Color::DarkGrey,
            ConsoleColor::Blue => Color::Blue,
            ConsoleColor::Green => Color::Green,
            ConsoleColor::Cyan => Color::Cyan,
            ConsoleColor::Red => Color::Red,
            ConsoleColor::Magenta => Color::Magenta,
            ConsoleColor::Yellow => Color::Yellow,
            ConsoleColor::White => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        let tags: Vec<String> = Severity::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(tags, ["INFO", "TRACE", "DEBUG", "ERROR", "FATAL", "WARN"]);
    }

    #[test]
    fn test_severity_order_is_declaration_order() {
        assert!(Severity::Info < Severity::Trace);
        assert!(Severity::Fatal < Severity::Warn);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!(matches!("verbose".parse::<Severity>(), Err(LogError::InvalidArgument(_))));
    }

    #[test]
    fn test_sink_kind_from_str() {
        assert_eq!("ConsoleLog".parse::<SinkKind>().unwrap(), SinkKind::ConsoleLog);
        assert_eq!("file".parse::<SinkKind>().unwrap(), SinkKind::FileLog);
        assert_eq!("FILELOG".parse::<SinkKind>().unwrap(), SinkKind::FileLog);

        match "syslog".parse::<SinkKind>() {
            Err(LogError::UnsupportedKind(name)) => assert_eq!(name, "syslog"),
            other => panic!("expected UnsupportedKind, got {:?}", other),
        }
    }

    #[test]
    fn test_palette_sentinel() {
        assert_eq!(ConsoleColor::PALETTE[0], ConsoleColor::Black);
        assert_eq!(ConsoleColor::PALETTE[9], ConsoleColor::Blue);
        assert_eq!(ConsoleColor::PALETTE[15], ConsoleColor::White);
    }
}
