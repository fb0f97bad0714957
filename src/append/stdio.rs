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

use std::io::Write;

use crate::Error;
use crate::Layout;
use crate::append::Append;
use crate::append::Capture;
use crate::layout::TextLayout;
use crate::record::Record;

/// Where a [`Console`] appender writes.
#[derive(Debug, Clone, Default)]
pub enum ConsoleTarget {
    /// The standard error stream.
    #[default]
    Stderr,
    /// The standard output stream.
    Stdout,
    /// An in-memory buffer, see [`Capture`].
    Capture(Capture),
}

/// An appender that prints log records to a console stream.
///
/// Each line is written with a single `write_all` call on the locked stream, so lines from
/// concurrent callers never interleave.
#[derive(Debug)]
pub struct Console {
    target: ConsoleTarget,
    layout: Box<dyn Layout>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleTarget::default())
    }
}

impl Console {
    /// Create a new console appender writing to `target`.
    ///
    /// Default to a colored [`TextLayout`].
    pub fn new(target: ConsoleTarget) -> Self {
        Self {
            target,
            layout: Box::new(TextLayout::default()),
        }
    }

    /// Set the layout for the [`Console`] appender.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::append::Console;
    /// use multilog::layout::TextLayout;
    ///
    /// let console = Console::default().with_layout(TextLayout::default().no_color());
    /// ```
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }
}

impl Append for Console {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        match &self.target {
            ConsoleTarget::Stderr => std::io::stderr()
                .lock()
                .write_all(&bytes)
                .map_err(Error::from_io_error)?,
            ConsoleTarget::Stdout => std::io::stdout()
                .lock()
                .write_all(&bytes)
                .map_err(Error::from_io_error)?,
            ConsoleTarget::Capture(capture) => capture.push(&bytes),
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        match &self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush().map_err(Error::from_io_error),
            ConsoleTarget::Stdout => std::io::stdout().flush().map_err(Error::from_io_error),
            ConsoleTarget::Capture(_) => Ok(()),
        }
    }
}
