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

//! Multilog sets up named loggers that write every record to up to three sinks at once.
//!
//! # Overview
//!
//! A logger writes to the console, to a main log file and, when debug output is requested, to a
//! separate debug file. Each sink has its own threshold. The main file rolls over by size, hourly
//! or daily, and the debug file rolls over daily. Console lines are colored by severity.
//!
//! Loggers are keyed by identity. Setting up the same identity twice returns the same logger.
//!
//! # Examples
//!
//! Setup with defaults, writing `log/<program>.log`:
//!
//! ```no_run
//! let logger = multilog::setup(multilog::Config::default()).unwrap();
//!
//! logger.info("This goes to the log file.");
//! logger.warning("This goes to the log file and to stderr.");
//! ```
//!
//! Debug output with a separate debug file:
//!
//! ```
//! use multilog::Config;
//! use multilog::Level;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = multilog::setup(
//!     Config::new()
//!         .name("svc")
//!         .log_dir(dir.path())
//!         .console_level(Level::Error)
//!         .file_level(Level::Debug),
//! )
//! .unwrap();
//!
//! logger.debug("only in svc-debug.log");
//! logger.info("in svc.log and svc-debug.log");
//! logger.critical("everywhere");
//! assert_eq!(logger.debug_file_path(), Some(dir.path().join("svc-debug.log").as_path()));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod config;
pub mod layout;

mod error;
mod logger;
mod record;
mod trap;

pub use self::append::Append;
pub use self::bridge::install;
pub use self::config::Config;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::layout::Layout;
pub use self::logger::Logger;
pub use self::logger::Registry;
pub use self::logger::SinkKind;
pub use self::record::Emphasis;
pub use self::record::Level;
pub use self::record::Record;
pub use self::trap::BestEffortTrap;
pub use self::trap::DefaultTrap;
pub use self::trap::Trap;

use std::sync::Arc;

/// Return the logger for the identity of `config` from the global [`Registry`], setting it up
/// on first use.
///
/// # Errors
///
/// Return an [`ErrorKind::Filesystem`] error if the log directory cannot be created or is not
/// a directory.
pub fn setup(config: Config) -> Result<Arc<Logger>, Error> {
    Registry::global().get_or_create(&config)
}
