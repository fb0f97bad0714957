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

//! Bridge from the [`log`] crate facade to a [`Logger`].

use std::sync::Arc;

use crate::Level;
use crate::Logger;
use crate::record::Emphasis;

struct LogCrateLogger(Arc<Logger>);

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        log::Log::enabled(self.0.as_ref(), metadata)
    }

    fn log(&self, record: &log::Record) {
        log::Log::log(self.0.as_ref(), record);
    }

    fn flush(&self) {
        log::Log::flush(self.0.as_ref());
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        self.emit(record.level().into(), Emphasis::Plain, *record.args());
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

fn level_filter(level: Level) -> log::LevelFilter {
    match level {
        Level::Debug => log::LevelFilter::Debug,
        Level::Info => log::LevelFilter::Info,
        Level::Warning => log::LevelFilter::Warn,
        Level::Error | Level::Critical => log::LevelFilter::Error,
    }
}

/// Route the [`log`] crate macros to `logger`.
///
/// The maximum level of the facade is set to the finest threshold of the logger.
///
/// # Errors
///
/// An error is returned if the global logger of the `log` crate has already been set.
///
/// # Examples
///
/// ```
/// use multilog::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = multilog::setup(Config::new().name("bridged").log_dir(dir.path())).unwrap();
/// multilog::bridge::install(logger).unwrap();
///
/// log::info!("routed to the bridged log file");
/// ```
pub fn install(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    let max_level = level_filter(logger.finest_level());
    log::set_boxed_logger(Box::new(LogCrateLogger(logger)))?;
    log::set_max_level(max_level);
    Ok(())
}
