//! Log levels and their OpenTelemetry severity mapping.

use std::fmt;
use std::str::FromStr;

/// The eight log levels accepted by the handler.
///
/// Ordering follows increasing severity so the minimum-level check in the
/// handler is a plain comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Default for Level {
    fn default() -> Self {
        Self::Debug
    }
}

impl Level {
    /// OpenTelemetry severity pair for this level.
    ///
    /// The numeric code keeps the full eight-step granularity while the text
    /// tier collapses to DEBUG/INFO/WARN/ERROR/FATAL, so `Notice` shares the
    /// INFO tier, `Critical` the ERROR tier, and `Alert`/`Emergency` the
    /// FATAL tier.
    ///
    /// See <https://opentelemetry.io/docs/specs/otel/logs/data-model/#field-severitynumber>
    pub fn severity(self) -> (i32, &'static str) {
        match self {
            Self::Debug => (5, "DEBUG"),
            Self::Info => (9, "INFO"),
            Self::Notice => (10, "INFO"),
            Self::Warning => (13, "WARN"),
            Self::Error => (17, "ERROR"),
            Self::Critical => (18, "ERROR"),
            Self::Alert => (21, "FATAL"),
            Self::Emergency => (22, "FATAL"),
        }
    }

    /// Parse a level name, falling back to [`Level::Debug`] when unknown.
    pub fn parse_or_debug(s: &str) -> Self {
        s.parse().unwrap_or(Self::Debug)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Alert => "alert",
            Self::Emergency => "emergency",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "notice" => Ok(Self::Notice),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "alert" => Ok(Self::Alert),
            "emergency" => Ok(Self::Emergency),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Level::Debug, 5, "DEBUG")]
    #[case(Level::Info, 9, "INFO")]
    #[case(Level::Notice, 10, "INFO")]
    #[case(Level::Warning, 13, "WARN")]
    #[case(Level::Error, 17, "ERROR")]
    #[case(Level::Critical, 18, "ERROR")]
    #[case(Level::Alert, 21, "FATAL")]
    #[case(Level::Emergency, 22, "FATAL")]
    fn severity_mapping(#[case] level: Level, #[case] number: i32, #[case] text: &str) {
        assert_eq!(level.severity(), (number, text));
    }

    #[test]
    fn ordering_tracks_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Alert < Level::Emergency);
    }

    #[rstest]
    #[case("warning", Level::Warning)]
    #[case("WARN", Level::Warning)]
    #[case("Emergency", Level::Emergency)]
    fn parses_names(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(input.parse::<Level>(), Ok(expected));
    }

    #[test]
    fn unknown_name_falls_back_to_debug() {
        assert_eq!(Level::parse_or_debug("verbose"), Level::Debug);
    }
}
