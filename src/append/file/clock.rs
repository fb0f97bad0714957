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

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;

/// The time source of a rolling file writer.
#[derive(Debug)]
pub enum Clock {
    /// The system clock, observed in the given timezone.
    System(TimeZone),
    #[cfg(test)]
    Manual(ManualClock),
}

impl Clock {
    pub fn now(&self) -> Zoned {
        match self {
            Clock::System(tz) => Timestamp::now().to_zoned(tz.clone()),
            #[cfg(test)]
            Clock::Manual(clock) => clock.now(),
        }
    }

    pub fn timezone(&self) -> TimeZone {
        match self {
            Clock::System(tz) => tz.clone(),
            #[cfg(test)]
            Clock::Manual(clock) => clock.now().time_zone().clone(),
        }
    }

    #[cfg(test)]
    pub fn set_now(&mut self, now: Zoned) {
        if let Clock::Manual(clock) = self {
            clock.set_now(now);
        }
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
#[cfg(test)]
pub struct ManualClock {
    now: Arc<Mutex<Zoned>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: Zoned) -> ManualClock {
        ManualClock {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set_now(&self, now: Zoned) {
        *self.now.lock().unwrap() = now;
    }

    fn now(&self) -> Zoned {
        self.now.lock().unwrap().clone()
    }
}
