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

//! Logger configuration and its resolution into concrete names, paths and levels.
//!
//! Resolution never fails: every option has a deterministic default.

use std::convert::Infallible;
use std::num::NonZeroUsize;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use jiff::tz::TimeZone;

use crate::Level;
use crate::Trap;
use crate::append::ConsoleTarget;
use crate::trap::DefaultTrap;

/// Identity used when neither a name, a log file nor a program name is available.
pub const FALLBACK_IDENTITY: &str = "multilog";

/// Rotated generations kept for the debug file.
pub const DEBUG_RETENTION: usize = 2;

/// How the main log file is rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationPolicy {
    /// Roll over once the file has reached the configured size.
    #[default]
    Size,
    /// Roll over at the top of every hour.
    Hourly,
    /// Roll over at midnight.
    Daily,
}

impl From<&str> for RotationPolicy {
    /// `"daily"` and `"hourly"` select time based rotation; any other value selects [`Size`].
    ///
    /// [`Size`]: RotationPolicy::Size
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("daily") {
            RotationPolicy::Daily
        } else if s.eq_ignore_ascii_case("hourly") {
            RotationPolicy::Hourly
        } else {
            RotationPolicy::Size
        }
    }
}

impl FromStr for RotationPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RotationPolicy::from(s))
    }
}

/// The thresholds of the file sinks after the debug diversion policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLevels {
    /// Threshold of the main log file.
    pub main: Level,
    /// Threshold of the debug file, if one is created.
    pub debug: Option<Level>,
}

impl FileLevels {
    /// Apply the debug diversion policy to the requested file threshold.
    ///
    /// A request finer than [`Level::Info`] creates a separate debug file at [`Level::Debug`]
    /// and raises the main file to [`Level::Info`], so debug lines only land in the debug file.
    /// Any other request is used as is for the main file.
    ///
    /// ```
    /// use multilog::Level;
    /// use multilog::config::FileLevels;
    ///
    /// let levels = FileLevels::with_debug_diversion(Level::Debug);
    /// assert_eq!(levels.main, Level::Info);
    /// assert_eq!(levels.debug, Some(Level::Debug));
    ///
    /// let levels = FileLevels::with_debug_diversion(Level::Warning);
    /// assert_eq!(levels.main, Level::Warning);
    /// assert_eq!(levels.debug, None);
    /// ```
    pub fn with_debug_diversion(requested: Level) -> Self {
        if requested.is_finer_than(Level::Info) {
            FileLevels {
                main: Level::Info,
                debug: Some(Level::Debug),
            }
        } else {
            FileLevels {
                main: requested,
                debug: None,
            }
        }
    }
}

/// Options for setting up a [`Logger`](crate::Logger).
///
/// # Examples
///
/// ```
/// use multilog::Config;
/// use multilog::Level;
/// use multilog::config::RotationPolicy;
///
/// let config = Config::new()
///     .name("svc")
///     .log_dir("log/svc")
///     .console_level(Level::Info)
///     .file_level(Level::Debug)
///     .rotation(RotationPolicy::Daily)
///     .retention(7);
/// assert_eq!(config.resolve().identity, "svc");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    name: Option<String>,
    log_dir: PathBuf,
    log_file: Option<String>,
    console_level: Level,
    file_level: Level,
    rotation: RotationPolicy,
    retention: usize,
    max_bytes: usize,
    program: Option<String>,
    console_target: ConsoleTarget,
    console_color: bool,
    timezone: TimeZone,
    trap: Arc<dyn Trap>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a configuration with every option at its default.
    pub fn new() -> Self {
        Self {
            name: None,
            log_dir: PathBuf::from("log"),
            log_file: None,
            console_level: Level::Warning,
            file_level: Level::Info,
            rotation: RotationPolicy::Size,
            retention: 10,
            max_bytes: 1024 * 1024,
            program: None,
            console_target: ConsoleTarget::Stderr,
            console_color: true,
            timezone: TimeZone::system(),
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Name the logger explicitly. Takes precedence over [`log_file`](Config::log_file).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Directory of the log files. Default to `log`.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Derive the identity from a log file name, such as `app.log`.
    ///
    /// Only the final path component is used and a trailing `.log` is dropped.
    pub fn log_file(mut self, file: impl Into<String>) -> Self {
        self.log_file = Some(file.into());
        self
    }

    /// Threshold of the console sink. Default to [`Level::Warning`].
    pub fn console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Requested threshold of the file sinks. Default to [`Level::Info`].
    ///
    /// See [`FileLevels::with_debug_diversion`] for how levels finer than info are handled.
    pub fn file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    /// Rotation policy of the main log file. Default to [`RotationPolicy::Size`].
    pub fn rotation(mut self, rotation: impl Into<RotationPolicy>) -> Self {
        self.rotation = rotation.into();
        self
    }

    /// Rotated generations of the main log file to keep. Default to 10.
    pub fn retention(mut self, n: usize) -> Self {
        self.retention = n;
        self
    }

    /// Size in bytes that triggers size based rotation. Default to 1 MiB.
    ///
    /// Zero disables size based rotation.
    pub fn max_bytes(mut self, n: usize) -> Self {
        self.max_bytes = n;
        self
    }

    /// Override the program name shown in the banner and used as the default identity.
    ///
    /// Default to the base name of the running executable.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Stream of the console sink. Default to [`ConsoleTarget::Stderr`].
    pub fn console_target(mut self, target: ConsoleTarget) -> Self {
        self.console_target = target;
        self
    }

    /// Whether the console sink emits ANSI colors. Default to `true`.
    pub fn console_color(mut self, enabled: bool) -> Self {
        self.console_color = enabled;
        self
    }

    /// Time zone of timestamps and rotation boundaries. Default to the system time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Trap receiving sink failures. Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// Resolve the configuration into concrete names, paths and levels.
    pub fn resolve(&self) -> ResolvedConfig {
        let program = self
            .program
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(program_name);
        let identity = resolve_identity(
            self.name.as_deref(),
            self.log_file.as_deref(),
            &program,
        );

        ResolvedConfig {
            main_file_name: format!("{identity}.log"),
            debug_file_name: format!("{identity}-debug.log"),
            identity,
            program,
            log_dir: normalize_path(&self.log_dir),
            console_level: self.console_level,
            file_levels: FileLevels::with_debug_diversion(self.file_level),
            rotation: self.rotation,
            retention: self.retention,
            debug_retention: DEBUG_RETENTION,
            max_bytes: NonZeroUsize::new(self.max_bytes),
            console_target: self.console_target.clone(),
            console_color: self.console_color,
            timezone: self.timezone.clone(),
            trap: self.trap.clone(),
        }
    }
}

/// A fully resolved configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ResolvedConfig {
    /// The unique key of the logger.
    pub identity: String,
    /// The program name shown in the banner.
    pub program: String,
    /// The normalized log directory.
    pub log_dir: PathBuf,
    /// `{identity}.log`
    pub main_file_name: String,
    /// `{identity}-debug.log`
    pub debug_file_name: String,
    /// Threshold of the console sink.
    pub console_level: Level,
    /// Thresholds of the file sinks.
    pub file_levels: FileLevels,
    /// Rotation policy of the main file.
    pub rotation: RotationPolicy,
    /// Rotated generations of the main file to keep.
    pub retention: usize,
    /// Rotated generations of the debug file to keep.
    pub debug_retention: usize,
    /// Size trigger of size based rotation, `None` if disabled.
    pub max_bytes: Option<NonZeroUsize>,
    /// Stream of the console sink.
    pub console_target: ConsoleTarget,
    /// Whether the console sink emits ANSI colors.
    pub console_color: bool,
    /// Time zone of timestamps and rotation boundaries.
    pub timezone: TimeZone,
    /// Trap receiving sink failures.
    pub trap: Arc<dyn Trap>,
}

impl ResolvedConfig {
    /// Path of the main log file.
    pub fn main_file_path(&self) -> PathBuf {
        self.log_dir.join(&self.main_file_name)
    }

    /// Path of the debug log file, if the debug diversion policy creates one.
    pub fn debug_file_path(&self) -> Option<PathBuf> {
        self.file_levels
            .debug
            .map(|_| self.log_dir.join(&self.debug_file_name))
    }
}

fn resolve_identity(name: Option<&str>, log_file: Option<&str>, program: &str) -> String {
    if let Some(name) = name.filter(|s| !s.is_empty()) {
        return name.to_string();
    }

    let from_log_file = log_file
        .and_then(|f| Path::new(f).file_name())
        .and_then(|f| f.to_str())
        .map(|f| f.strip_suffix(".log").unwrap_or(f))
        .filter(|s| !s.is_empty());
    if let Some(id) = from_log_file {
        return id.to_string();
    }

    let from_program = Path::new(program)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty());
    match from_program {
        Some(id) => id.to_string(),
        None => FALLBACK_IDENTITY.to_string(),
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

/// Lexically normalize a path: drop `.` components and fold `dir/..` pairs.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
