// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use std::fmt::{Display, Formatter};

pub mod calendar;
pub mod days_patterns;

pub use calendar::Calendar;

/// Duration since the midnight from which all times of the search day
/// are counted. This corresponds to the "Time" notion found in
/// gtfs/ntfs stop_times.txt : values greater than 24h are allowed so
/// that trips running after midnight stay attached to their service day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct SecondsSinceDayStart {
    seconds: u32,
}

// we allow at most 2 days past the reference midnight
const MAX_SECONDS_SINCE_DAY_START: u32 = 48 * 60 * 60;

/// Number of days since the first allowed day of the data
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DaysSinceDatasetStart {
    pub(crate) days: u16,
}

/// A duration expressed as a whole number of seconds, deserialized
/// from a plain seconds count.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Ord, PartialOrd, Hash, serde::Deserialize)]
#[serde(transparent)]
pub struct PositiveDuration {
    pub(crate) seconds: u32,
}

impl PositiveDuration {
    pub fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub const fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> PositiveDuration {
        let total_seconds = seconds + 60 * minutes + 60 * 60 * hours;
        PositiveDuration {
            seconds: total_seconds,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.seconds as u64
    }
}

impl Display for PositiveDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / (60 * 60);
        let minutes_in_secs = self.seconds % (60 * 60);
        let minutes = minutes_in_secs / 60;
        let seconds = minutes_in_secs % 60;
        if hours != 0 {
            write!(f, "{}h{:02}m{:02}s", hours, minutes, seconds)
        } else if minutes != 0 {
            write!(f, "{}m{:02}s", minutes, seconds)
        } else {
            write!(f, "{}s", seconds)
        }
    }
}

impl SecondsSinceDayStart {
    pub fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub fn max() -> Self {
        Self {
            seconds: MAX_SECONDS_SINCE_DAY_START,
        }
    }

    pub fn from_seconds(seconds: u32) -> Option<Self> {
        if seconds > MAX_SECONDS_SINCE_DAY_START {
            None
        } else {
            Some(Self { seconds })
        }
    }

    /// Parse a `HH:MM:SS` string, allowing hours beyond 24.
    pub fn from_hms_str(string: &str) -> Option<Self> {
        let mut fields = string.split(':');
        let hours: u32 = fields.next()?.parse().ok()?;
        let minutes: u32 = fields.next()?.parse().ok()?;
        let seconds: u32 = fields.next()?.parse().ok()?;
        if fields.next().is_some() || minutes >= 60 || seconds >= 60 {
            return None;
        }
        let total_seconds = hours
            .checked_mul(60 * 60)?
            .checked_add(minutes * 60 + seconds)?;
        Self::from_seconds(total_seconds)
    }

    pub fn total_seconds(&self) -> u32 {
        self.seconds
    }

    pub fn duration_since(&self, earlier: &SecondsSinceDayStart) -> Option<PositiveDuration> {
        self.seconds
            .checked_sub(earlier.seconds)
            .map(|seconds| PositiveDuration { seconds })
    }

    pub fn checked_sub(&self, duration: PositiveDuration) -> Option<Self> {
        self.seconds
            .checked_sub(duration.seconds)
            .map(|seconds| Self { seconds })
    }

    pub fn checked_add(&self, duration: PositiveDuration) -> Option<Self> {
        let seconds = self.seconds + duration.seconds;
        if seconds > MAX_SECONDS_SINCE_DAY_START {
            None
        } else {
            Some(Self { seconds })
        }
    }
}

impl Display for SecondsSinceDayStart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.seconds / 60 / 60,
            self.seconds / 60 % 60,
            self.seconds % 60
        )
    }
}

impl std::ops::Add for PositiveDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.seconds,
        }
    }
}

impl std::ops::Add<PositiveDuration> for SecondsSinceDayStart {
    type Output = Self;

    fn add(self, rhs: PositiveDuration) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.seconds,
        }
    }
}

impl std::ops::Mul<u32> for PositiveDuration {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        PositiveDuration {
            seconds: self.seconds * rhs,
        }
    }
}
