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

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use jiff::Zoned;

use crate::Error;
use crate::Level;
use crate::Record;
use crate::append::Console;
use crate::append::FileBuilder;
use crate::config::FileLevels;
use crate::config::ResolvedConfig;
use crate::config::RotationPolicy;
use crate::layout::TextLayout;
use crate::record::Emphasis;

mod dispatch;
mod registry;

pub use self::dispatch::SinkKind;
pub use self::registry::Registry;

use self::dispatch::Dispatch;

const BANNER_RULE: &str = "--------------------------------------";

/// A named logger writing every record to a console sink, a main file sink and, optionally, a
/// debug file sink.
///
/// Each sink applies its own threshold. Loggers are created through a [`Registry`], usually by
/// [`setup`](crate::setup), and shared as `Arc<Logger>`.
#[derive(Debug)]
pub struct Logger {
    identity: String,
    program: String,
    log_dir: PathBuf,
    main_file_path: PathBuf,
    debug_file_path: Option<PathBuf>,
    console_level: Level,
    file_levels: FileLevels,
    created_at: Zoned,
    dispatches: Vec<Dispatch>,
}

impl Logger {
    /// Build the sinks of a resolved configuration.
    ///
    /// Only a log directory that cannot be created or used fails. A file sink that cannot be
    /// opened is trapped and starts degraded.
    fn attach(config: &ResolvedConfig) -> Result<Logger, Error> {
        ensure_log_dir(&config.log_dir)?;

        let mut dispatches = Vec::with_capacity(3);
        let trap = &config.trap;

        if let Some(threshold) = config.file_levels.debug {
            dispatches.push(match debug_file_builder(config).build() {
                Ok(file) => Dispatch::new(SinkKind::DebugFile, threshold, file, trap.clone()),
                Err(err) => Dispatch::failed(SinkKind::DebugFile, threshold, err, trap.clone()),
            });
        }

        let threshold = config.file_levels.main;
        dispatches.push(match main_file_builder(config).build() {
            Ok(file) => Dispatch::new(SinkKind::File, threshold, file, trap.clone()),
            Err(err) => Dispatch::failed(SinkKind::File, threshold, err, trap.clone()),
        });

        let layout = TextLayout::default().timezone(config.timezone.clone());
        let layout = if config.console_color {
            layout
        } else {
            layout.no_color()
        };
        let console = Console::new(config.console_target.clone()).with_layout(layout);
        dispatches.push(Dispatch::new(
            SinkKind::Console,
            config.console_level,
            console,
            trap.clone(),
        ));

        Ok(Logger {
            identity: config.identity.clone(),
            program: config.program.clone(),
            log_dir: config.log_dir.clone(),
            main_file_path: config.main_file_path(),
            debug_file_path: config.debug_file_path(),
            console_level: config.console_level,
            file_levels: config.file_levels,
            created_at: Zoned::now().with_time_zone(config.timezone.clone()),
            dispatches,
        })
    }

    /// Emit the startup banner at info level.
    fn banner(&self) {
        let debug_file = match &self.debug_file_path {
            Some(path) => path.display().to_string(),
            None => "None".to_string(),
        };
        let created_at = self.created_at.strftime("%Y-%m-%d %H:%M:%S.%6f");

        self.info(format_args!(
            "Logging to console with level {}",
            self.console_level
        ));
        self.info(format_args!("Logging to file {}", self.main_file_path.display()));
        self.info(format_args!("Debug to file {debug_file}"));
        self.info(BANNER_RULE);
        self.info(format_args!("        Started {}", self.program));
        self.info(format_args!("        {created_at}"));
        self.info(BANNER_RULE);
    }

    pub(crate) fn emit(&self, level: Level, emphasis: Emphasis, payload: fmt::Arguments) {
        let record = Record::new(level, payload).with_emphasis(emphasis);
        for dispatch in &self.dispatches {
            dispatch.log(&record);
        }
    }

    /// Log a message at the given level.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.emit(level, Emphasis::Plain, format_args!("{message}"));
    }

    /// Log a message at [`Level::Debug`].
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    /// Log a message at [`Level::Info`].
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    /// Log a message at [`Level::Warning`].
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    /// Log a message at [`Level::Error`].
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Log a message at [`Level::Critical`].
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }

    /// Log an emphasized message at [`Level::Info`].
    ///
    /// The console renders it in bold. Files get the plain line.
    pub fn important(&self, message: impl fmt::Display) {
        self.emit(Level::Info, Emphasis::Important, format_args!("{message}"));
    }

    /// Whether any sink would be offered a record at `level`.
    pub fn enabled(&self, level: Level) -> bool {
        self.dispatches.iter().any(|d| d.enabled(level))
    }

    /// The finest threshold among all sinks.
    pub fn finest_level(&self) -> Level {
        self.dispatches
            .iter()
            .map(|d| d.threshold())
            .min()
            .unwrap_or(Level::Critical)
    }

    /// Flush every sink.
    pub fn flush(&self) {
        for dispatch in &self.dispatches {
            dispatch.flush();
        }
    }

    /// The sinks whose last write failed, plus those that could not be set up.
    pub fn degraded_sinks(&self) -> Vec<SinkKind> {
        self.dispatches
            .iter()
            .filter(|d| d.is_degraded())
            .map(|d| d.kind())
            .collect()
    }

    /// The unique key of this logger.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The program name shown in the banner.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The normalized log directory.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the main log file.
    pub fn main_file_path(&self) -> &Path {
        &self.main_file_path
    }

    /// Path of the debug log file, if there is one.
    pub fn debug_file_path(&self) -> Option<&Path> {
        self.debug_file_path.as_deref()
    }

    /// Threshold of the console sink.
    pub fn console_level(&self) -> Level {
        self.console_level
    }

    /// Threshold of the main file sink.
    pub fn file_level(&self) -> Level {
        self.file_levels.main
    }

    /// Thresholds of the file sinks.
    pub fn file_levels(&self) -> FileLevels {
        self.file_levels
    }

    /// When this logger was set up.
    pub fn created_at(&self) -> &Zoned {
        &self.created_at
    }
}

fn file_layout(config: &ResolvedConfig) -> TextLayout {
    TextLayout::default()
        .no_color()
        .timezone(config.timezone.clone())
}

fn debug_file_builder(config: &ResolvedConfig) -> FileBuilder {
    FileBuilder::new(&config.log_dir, &config.debug_file_name)
        .layout(file_layout(config))
        .rollover_daily()
        .retention(config.debug_retention)
        .timezone(config.timezone.clone())
        .trap(config.trap.clone())
}

fn main_file_builder(config: &ResolvedConfig) -> FileBuilder {
    let builder = FileBuilder::new(&config.log_dir, &config.main_file_name)
        .layout(file_layout(config))
        .retention(config.retention)
        .timezone(config.timezone.clone())
        .trap(config.trap.clone());
    match config.rotation {
        RotationPolicy::Size => match config.max_bytes {
            Some(n) => builder.rollover_size(n),
            None => builder,
        },
        RotationPolicy::Hourly => builder.rollover_hourly(),
        RotationPolicy::Daily => builder.rollover_daily(),
    }
}

fn ensure_log_dir(dir: &Path) -> Result<(), Error> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::filesystem("log directory path is not a directory")
            .with_context("path", dir.display()));
    }

    fs::create_dir_all(dir).map_err(|err| {
        Error::filesystem("failed to create log directory")
            .with_context("path", dir.display())
            .with_source(err)
    })
}
