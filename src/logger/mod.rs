//! Leveled, colorized console logger
//!
//! Every permitted call renders two [`Segment`]s: a colored severity tag
//! such as `"[info] "` without a line terminator, followed by the formatted
//! message with one. Both are written in order to a [`CustomLogger`].
//!
//! ```rust
//! use std::sync::Arc;
//! use weapp_sdk::logger::{Level, LevelLogger, Logger, MemoryOutput};
//! use weapp_sdk::log_warn;
//!
//! let output = Arc::new(MemoryOutput::new());
//! let logger = LevelLogger::new(output.clone(), Level::Warn, false);
//!
//! log_warn!(logger, "quota at {}%", 90);
//! logger.info(format_args!("dropped"));
//!
//! assert!(output.contents().contains("[warn] "));
//! assert!(output.contents().contains("quota at 90%"));
//! assert!(!output.contents().contains("dropped"));
//! ```

mod level;
mod output;

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use colored::Colorize;

pub use level::Level;
pub use output::{CustomLogger, MemoryOutput, Stderr, Stdout};

/// Color tag, resolved to a terminal color when a segment is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Green,
    Magenta,
    Red,
    White,
}

impl From<Color> for colored::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Green => colored::Color::Green,
            Color::Magenta => colored::Color::Magenta,
            Color::Red => colored::Color::Red,
            Color::White => colored::Color::White,
        }
    }
}

/// One fragment of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub newline: bool,
    pub color: Option<Color>,
}

impl Segment {
    fn new(text: impl Into<String>, newline: bool, color: Color) -> Self {
        Self {
            text: text.into(),
            newline,
            color: Some(color),
        }
    }

    /// Writes the colored text, plus a line terminator when `newline` is set.
    /// Uncolored segments are skipped.
    pub fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        let Some(color) = self.color else {
            return Ok(());
        };
        let text = self.text.as_str().color(colored::Color::from(color));
        if self.newline {
            writeln!(w, "{text}")
        } else {
            write!(w, "{text}")
        }
    }
}

fn prefix(level: Level, colorful: bool) -> Option<Segment> {
    let (tag, color) = match level {
        Level::Silent => return None,
        Level::Error => ("[error] ", Color::Red),
        Level::Warn => ("[warn] ", Color::Magenta),
        Level::Info => ("[info] ", Color::Green),
    };
    let color = if colorful { color } else { Color::White };
    Some(Segment::new(tag, false, color))
}

/// Builds the segments for one call at `level`.
///
/// `Level::Silent` has no tag, so only the message segment is produced.
pub fn render(level: Level, colorful: bool, args: fmt::Arguments<'_>) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(2);
    segments.extend(prefix(level, colorful));
    segments.push(Segment::new(fmt::format(args), true, Color::White));
    segments
}

/// Leveled logging interface.
pub trait Logger: Send + Sync {
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);

    /// Replaces the threshold. Affects subsequent calls only.
    fn set_level(&self, level: Level);

    fn level(&self) -> Level;
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info(&self, args: fmt::Arguments<'_>) {
        (**self).info(args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        (**self).warn(args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }

    fn set_level(&self, level: Level) {
        (**self).set_level(level)
    }

    fn level(&self) -> Level {
        (**self).level()
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn info(&self, args: fmt::Arguments<'_>) {
        (**self).info(args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        (**self).warn(args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }

    fn set_level(&self, level: Level) {
        (**self).set_level(level)
    }

    fn level(&self) -> Level {
        (**self).level()
    }
}

/// [`Logger`] writing colored segments to a [`CustomLogger`].
///
/// The threshold is atomic, so one instance can be shared across threads
/// behind an `Arc`.
pub struct LevelLogger {
    output: Arc<dyn CustomLogger>,
    colorful: bool,
    level: AtomicU8,
}

impl fmt::Debug for LevelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("colorful", &self.colorful)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

impl LevelLogger {
    pub fn new(output: Arc<dyn CustomLogger>, level: Level, colorful: bool) -> Self {
        Self {
            output,
            colorful,
            level: AtomicU8::new(level as u8),
        }
    }

    /// Logger writing to standard output.
    pub fn console(level: Level, colorful: bool) -> Self {
        Self::new(Arc::new(Stdout), level, colorful)
    }

    pub fn colorful(&self) -> bool {
        self.colorful
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.level().permits(level) {
            return;
        }
        for segment in render(level, self.colorful, args) {
            let _ = segment.write_to(&mut *self.output.writer());
        }
    }
}

impl Logger for LevelLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }
}

/// Logs at info severity: `log_info!(logger, "fetched {} items", n)`.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logger::Logger::info(&$logger, ::std::format_args!($($arg)+))
    };
}

/// Logs at warn severity.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logger::Logger::warn(&$logger, ::std::format_args!($($arg)+))
    };
}

/// Logs at error severity.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logger::Logger::error(&$logger, ::std::format_args!($($arg)+))
    };
}
