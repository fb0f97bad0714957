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
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::Error;
use crate::Level;
use crate::Record;
use crate::Trap;

/// The sinks a [`Logger`](crate::Logger) dispatches records to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// The console stream.
    Console,
    /// The main log file.
    File,
    /// The debug log file.
    DebugFile,
}

impl SinkKind {
    /// Return the string representation of the `SinkKind`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
            SinkKind::DebugFile => "debug file",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink with its own threshold.
///
/// A failed write degrades the sink until a later write succeeds. The error is trapped when the
/// sink turns degraded and the records it fails on are dropped, so the remaining sinks keep
/// working. Each record is still offered to a degraded sink.
///
/// A sink that could not be set up has nothing to write to and stays degraded.
#[derive(Debug)]
pub(crate) struct Dispatch {
    kind: SinkKind,
    threshold: Level,
    append: Option<Box<dyn Append>>,
    degraded: AtomicBool,
    trap: Arc<dyn Trap>,
}

impl Dispatch {
    pub(crate) fn new(
        kind: SinkKind,
        threshold: Level,
        append: impl Into<Box<dyn Append>>,
        trap: Arc<dyn Trap>,
    ) -> Self {
        Self {
            kind,
            threshold,
            append: Some(append.into()),
            degraded: AtomicBool::new(false),
            trap,
        }
    }

    /// A sink that could not be set up. It is degraded from the start.
    pub(crate) fn failed(kind: SinkKind, threshold: Level, err: Error, trap: Arc<dyn Trap>) -> Self {
        trap.trap(&err.with_context("sink", kind));
        Self {
            kind,
            threshold,
            append: None,
            degraded: AtomicBool::new(true),
            trap,
        }
    }

    pub(crate) fn kind(&self) -> SinkKind {
        self.kind
    }

    pub(crate) fn threshold(&self) -> Level {
        self.threshold
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.threshold && self.append.is_some()
    }

    pub(crate) fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    pub(crate) fn log(&self, record: &Record) {
        if !self.enabled(record.level()) {
            return;
        }

        if let Some(append) = &self.append {
            match append.append(record) {
                Ok(()) => self.recover(),
                Err(err) => self.degrade(err),
            }
        }
    }

    pub(crate) fn flush(&self) {
        if let Some(append) = &self.append {
            if let Err(err) = append.flush() {
                self.degrade(err);
            }
        }
    }

    fn recover(&self) {
        if self.is_degraded() {
            self.degraded.store(false, Ordering::Release);
        }
    }

    fn degrade(&self, err: Error) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            self.trap.trap(&err.with_context("sink", self.kind));
        }
    }
}
