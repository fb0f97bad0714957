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

//! Appender for writing log records to a file rolled over by size or by time.
//!
//! # Example
//!
//!```
//! use std::num::NonZeroUsize;
//!
//! use multilog::Append;
//! use multilog::Level;
//! use multilog::Record;
//! use multilog::append::FileBuilder;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = FileBuilder::new(dir.path(), "app.log")
//!     .rollover_size(NonZeroUsize::new(1024 * 1024).unwrap())
//!     .retention(10)
//!     .build()
//!     .unwrap();
//!
//! file.append(&Record::new(Level::Info, format_args!("written to a rolling file")))
//!     .unwrap();
//! ```

pub use self::append::File;
pub use self::append::FileBuilder;

mod append;
pub(crate) mod clock;
mod rolling;
mod rotation;
