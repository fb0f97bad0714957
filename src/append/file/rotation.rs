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

use jiff::RoundMode;
use jiff::ToSpan;
use jiff::Unit;
use jiff::Zoned;
use jiff::ZonedRound;

/// Defines a fixed period for rolling of a log file.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Rotation {
    /// Roll over at the top of every hour.
    Hourly,
    /// Roll over at midnight.
    Daily,
    /// No time based rotation.
    Never,
}

impl Rotation {
    /// The millisecond timestamp of the next period boundary after `current`.
    pub fn next_date_timestamp(&self, current: &Zoned) -> Option<usize> {
        let next = match *self {
            Rotation::Hourly => current
                .round(
                    ZonedRound::new()
                        .smallest(Unit::Hour)
                        .mode(RoundMode::Trunc),
                )
                .ok()?
                .checked_add(1.hour())
                .ok()?,
            Rotation::Daily => current
                .date()
                .tomorrow()
                .ok()?
                .to_zoned(current.time_zone().clone())
                .ok()?,
            Rotation::Never => return None,
        };

        Some(next.timestamp().as_millisecond() as usize)
    }

    /// The `strftime` pattern of the date part of archived file names.
    pub fn date_format(&self) -> &'static str {
        match *self {
            Rotation::Hourly => "%Y-%m-%d_%H",
            Rotation::Daily => "%Y-%m-%d",
            Rotation::Never => "%Y-%m-%d",
        }
    }
}
