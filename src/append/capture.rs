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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// A shared in-memory buffer that collects console output.
///
/// Clones share the same buffer. Useful in tests, or to embed console output in another UI.
///
/// # Examples
///
/// ```
/// use multilog::append::Capture;
/// use multilog::append::ConsoleTarget;
///
/// let capture = Capture::default();
/// let target = ConsoleTarget::Capture(capture.clone());
/// assert!(capture.contents().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    fn buffer(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn push(&self, bytes: &[u8]) {
        self.buffer().extend_from_slice(bytes);
    }

    /// Everything captured so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer()).into_owned()
    }

    /// The captured lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.buffer().clear();
    }
}
