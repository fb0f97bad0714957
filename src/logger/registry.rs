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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

use crate::Config;
use crate::Error;
use crate::Logger;

/// Loggers keyed by identity.
///
/// A given identity is configured at most once: later requests for it return the existing
/// logger and ignore their configuration.
#[derive(Debug, Default)]
pub struct Registry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process wide registry used by [`setup`](crate::setup).
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    fn loggers(&self) -> MutexGuard<'_, HashMap<String, Arc<Logger>>> {
        self.loggers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the logger for the identity of `config`, creating it on first use.
    ///
    /// Creating a logger prepares the log directory, attaches its sinks and emits the startup
    /// banner. Concurrent callers with the same identity observe exactly one logger.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::Filesystem`](crate::ErrorKind::Filesystem) error if the log
    /// directory cannot be created or is not a directory. Nothing is registered in that case.
    pub fn get_or_create(&self, config: &Config) -> Result<Arc<Logger>, Error> {
        let resolved = config.resolve();

        let mut loggers = self.loggers();
        if let Some(logger) = loggers.get(&resolved.identity) {
            return Ok(logger.clone());
        }

        let logger = Arc::new(Logger::attach(&resolved)?);
        logger.banner();
        loggers.insert(resolved.identity, logger.clone());
        Ok(logger)
    }

    /// Return the logger registered under `identity`, if any.
    pub fn get(&self, identity: &str) -> Option<Arc<Logger>> {
        self.loggers().get(identity).cloned()
    }

    /// The number of registered loggers.
    pub fn len(&self) -> usize {
        self.loggers().len()
    }

    /// Whether no logger has been registered.
    pub fn is_empty(&self) -> bool {
        self.loggers().is_empty()
    }
}
