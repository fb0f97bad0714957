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

use std::borrow::Cow;
use std::fmt::Write;

use colored::Color;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::record::Emphasis;
use crate::record::Level;
use crate::record::Record;

const ESC_BOLD: &str = "1";
const ESC_RESET: &str = "\x1b[0m";

/// A layout that formats a record as `<timestamp> <LEVEL>: <message>`.
///
/// The level name is padded to eight characters. Output example:
///
/// ```text
/// 2024-08-11 22:44:57,172 WARNING : disk usage above 80%
/// 2024-08-11 22:44:57,172 INFO    : cache warmed
/// ```
///
/// When colors are enabled, the message (not the whole line) of warning, error and critical
/// records is wrapped in ANSI escape sequences, as is the message of important records.
#[derive(Debug, Clone)]
pub struct TextLayout {
    colors: EmphasisColor,
    no_color: bool,
    timezone: TimeZone,
    timestamp_format: Option<fn(Timestamp, &TimeZone) -> String>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            colors: EmphasisColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
            timestamp_format: None,
        }
    }
}

impl TextLayout {
    /// Customize the foreground color of warning messages. Default to bright yellow.
    ///
    /// No effect if `no_color` is set.
    pub fn warning_color(mut self, color: Color) -> Self {
        self.colors.warning = color;
        self
    }

    /// Customize the foreground color of error messages. Default to bright red.
    ///
    /// No effect if `no_color` is set.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the background color of critical messages. Default to bright red.
    ///
    /// No effect if `no_color` is set.
    pub fn critical_background(mut self, color: Color) -> Self {
        self.colors.critical = color;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Whether this layout emits ANSI escape sequences.
    pub fn is_colored(&self) -> bool {
        !self.no_color
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use multilog::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Set a user-defined timestamp format function.
    ///
    /// Default to `YYYY-MM-DD HH:MM:SS,mmm` in the configured timezone.
    pub fn timestamp_format(mut self, format: fn(Timestamp, &TimeZone) -> String) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    fn write_message(&self, text: &mut String, record: &Record) {
        let code = if self.no_color {
            None
        } else {
            self.colors.escape_code(record.level(), record.emphasis())
        };

        // SAFETY: write to a string always succeeds
        match code {
            None => write!(text, "{}", record.payload()).unwrap(),
            Some(code) => write!(text, "\x1b[{code}m{}{ESC_RESET}", record.payload()).unwrap(),
        }
    }
}

fn default_timestamp_format(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone())
        .strftime("%Y-%m-%d %H:%M:%S,%3f")
        .to_string()
}

impl Layout for TextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let ts = record.time();
        let mut text = match self.timestamp_format {
            Some(format) => format(ts, &self.timezone),
            None => default_timestamp_format(ts, &self.timezone),
        };

        let level = record.level();
        // SAFETY: write to a string always succeeds
        write!(&mut text, " {level:<8}: ").unwrap();
        self.write_message(&mut text, record);

        Ok(text.into_bytes())
    }
}

#[derive(Debug, Clone)]
struct EmphasisColor {
    /// Foreground color for warning messages.
    warning: Color,
    /// Foreground color for error messages.
    error: Color,
    /// Background color for critical messages.
    critical: Color,
}

impl Default for EmphasisColor {
    fn default() -> Self {
        Self {
            warning: Color::BrightYellow,
            error: Color::BrightRed,
            critical: Color::BrightRed,
        }
    }
}

impl EmphasisColor {
    /// The SGR parameter wrapped around a message, if any.
    fn escape_code(&self, level: Level, emphasis: Emphasis) -> Option<Cow<'static, str>> {
        if emphasis == Emphasis::Important {
            return Some(ESC_BOLD.into());
        }

        match level {
            Level::Debug | Level::Info => None,
            Level::Warning => Some(self.warning.to_fg_str()),
            Level::Error => Some(self.error.to_fg_str()),
            Level::Critical => Some(self.critical.to_bg_str()),
        }
    }
}
