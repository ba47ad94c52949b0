use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity threshold.
///
/// Ordered `Silent < Error < Warn < Info`. A call at severity `S` is emitted
/// when the configured threshold is `>= S`, so `Warn` lets both warnings and
/// errors through while `Silent` suppresses everything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Silent, Level::Error, Level::Warn, Level::Info];

    /// Whether a call at `call` severity passes this threshold.
    pub fn permits(self, call: Level) -> bool {
        self >= call
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Silent => "silent",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
        }
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Silent,
            1 => Level::Error,
            2 => Level::Warn,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Level::Silent),
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}
