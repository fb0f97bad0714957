// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log records and severity levels.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;

/// The severity of a log record, ordered from least to most severe.
///
/// ```
/// use multilog::Level;
///
/// assert!(Level::Debug < Level::Info);
/// assert!(Level::Error < Level::Critical);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained diagnostic detail.
    Debug,
    /// Routine information.
    Info,
    /// Something unexpected that the program recovered from.
    Warning,
    /// An operation failed.
    Error,
    /// The program may be unable to continue.
    Critical,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Whether this level is more verbose than `other`.
    pub fn is_finer_than(&self, other: Level) -> bool {
        *self < other
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("debug", Level::Debug),
            ("info", Level::Info),
            ("warning", Level::Warning),
            ("warn", Level::Warning),
            ("error", Level::Error),
            ("critical", Level::Critical),
            ("crit", Level::Critical),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new(ErrorKind::Config, format!("malformed level: {s:?}")))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

/// How a record is highlighted by layouts that support styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    /// Styled by its level only.
    #[default]
    Plain,
    /// An operator-visible milestone, rendered bold.
    Important,
}

/// A single log event on its way to the sinks.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    time: Timestamp,
    level: Level,
    emphasis: Emphasis,
    payload: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    /// Create a new record observed now.
    pub fn new(level: Level, payload: fmt::Arguments<'a>) -> Self {
        Record {
            time: Timestamp::now(),
            level,
            emphasis: Emphasis::Plain,
            payload,
        }
    }

    /// Set the emphasis of the record.
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Override the observed time.
    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = time;
        self
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The severity of the record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The emphasis of the record.
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// The message body.
    pub fn payload(&self) -> &fmt::Arguments<'a> {
        &self.payload
    }
}
