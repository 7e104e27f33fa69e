// Copyright (C) 2017 Kisio Digital and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Provides an easy way to create a `crate::TransitData`
//!
//! ```
//! # use rapido::builder::TimetableBuilder;
//!
//! # fn main() {
//!  let transit_data = TimetableBuilder::default()
//!      .vj("toto", |vj| {
//!          vj.st("A", "10:00:00", "10:01:00")
//!            .st("B", "11:00:00", "11:01:00");
//!      })
//!      .vj("tata", |vj| {
//!          vj.st("A", "10:00:00", "10:01:00")
//!            .st("D", "11:00:00", "11:01:00");
//!      })
//!      .build()
//!      .unwrap();
//! # }
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::time::{Calendar, PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::{init::TripTimesError, TransitData};

const DEFAULT_CALENDAR_ID: &str = "default_service";

/// Builder used to easily create a `TransitData`.
/// Note: if not explicitly set, all the vehicle journeys
/// will be attached to a default calendar starting 2020-01-01
pub struct TimetableBuilder {
    start_validity_period: NaiveDate,
    end_validity_period: NaiveDate,
    calendars: HashMap<String, Vec<NaiveDate>>,
    vehicle_journeys: Vec<VehicleJourneySpec>,
    transfers: Vec<(String, String, u32)>,
}

/// Builder used to create and modify a new vehicle journey.
/// Note: if not explicitly set, the vehicle journey
/// will be attached to a default calendar starting 2020-01-01
pub struct VehicleJourneyBuilder<'a> {
    builder: &'a mut TimetableBuilder,
    vj_idx: usize,
}

struct VehicleJourneySpec {
    name: String,
    calendar: String,
    // (stop name, debark time string, board time string)
    stop_times: Vec<(String, String, String)>,
}

impl Default for TimetableBuilder {
    fn default() -> Self {
        let date = "2020-01-01";
        Self::new(date, date)
    }
}

impl TimetableBuilder {
    pub fn new(start_validity_period: impl AsDate, end_validity_period: impl AsDate) -> Self {
        let start_date = start_validity_period.as_date();
        let end_date = end_validity_period.as_date();
        assert!(start_date <= end_date);
        let dates: Vec<_> = start_date
            .iter_days()
            .take_while(|date| *date <= end_date)
            .collect();
        let mut calendars = HashMap::new();
        calendars.insert(DEFAULT_CALENDAR_ID.to_string(), dates);
        Self {
            start_validity_period: start_date,
            end_validity_period: end_date,
            calendars,
            vehicle_journeys: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Add a calendar with an explicit list of active dates
    pub fn calendar(mut self, id: &str, dates: &[impl AsDate]) -> Self {
        let dates: Vec<NaiveDate> = dates.iter().map(|date| date.as_date()).collect();
        self.calendars.insert(id.to_string(), dates);
        self
    }

    /// Add a new vehicle journey, described by the closure
    ///
    /// ```
    /// # use rapido::builder::TimetableBuilder;
    ///
    /// # fn main() {
    /// let transit_data = TimetableBuilder::default()
    ///        .vj("toto", |vj| {
    ///            vj.st("A", "10:00:00", "10:00:30")
    ///              .st("B", "11:00:00", "11:00:30");
    ///        })
    ///        .build()
    ///        .unwrap();
    /// # }
    /// ```
    pub fn vj<F>(mut self, name: &str, mut vj_initer: F) -> Self
    where
        F: FnMut(VehicleJourneyBuilder),
    {
        let vj_idx = self.vehicle_journeys.len();
        self.vehicle_journeys.push(VehicleJourneySpec {
            name: name.to_string(),
            calendar: DEFAULT_CALENDAR_ID.to_string(),
            stop_times: Vec::new(),
        });
        vj_initer(VehicleJourneyBuilder {
            builder: &mut self,
            vj_idx,
        });
        self
    }

    /// Add a transfer between two stops, with a duration in seconds
    pub fn add_transfer(mut self, from_stop: &str, to_stop: &str, duration: u32) -> Self {
        self.transfers
            .push((from_stop.to_string(), to_stop.to_string(), duration));
        self
    }

    pub fn build(self) -> Result<TransitData, BuildError> {
        let calendar = Calendar::new(self.start_validity_period, self.end_validity_period);
        let mut transit_data = TransitData::new(calendar);

        let mut seen_vj_names: HashMap<String, ()> = HashMap::new();

        for vj in &self.vehicle_journeys {
            if seen_vj_names.insert(vj.name.clone(), ()).is_some() {
                return Err(BuildError::DuplicateVehicleJourney(vj.name.clone()));
            }
            if vj.stop_times.len() < 2 {
                return Err(BuildError::NotEnoughStopTimes(vj.name.clone()));
            }
            let dates = self
                .calendars
                .get(&vj.calendar)
                .ok_or_else(|| BuildError::UnknownCalendar(vj.name.clone(), vj.calendar.clone()))?;
            let days_pattern = transit_data
                .days_patterns
                .get_or_insert(dates.iter(), &transit_data.calendar);

            let mut stops = Vec::with_capacity(vj.stop_times.len());
            let mut debark_times = Vec::with_capacity(vj.stop_times.len());
            let mut board_times = Vec::with_capacity(vj.stop_times.len());
            for (stop_name, debark_time, board_time) in &vj.stop_times {
                let stop = transit_data.add_or_get_stop(stop_name);
                if stops.contains(&stop) {
                    return Err(BuildError::DuplicateStop(vj.name.clone(), stop_name.clone()));
                }
                stops.push(stop);
                debark_times.push(parse_time(debark_time, &vj.name)?);
                board_times.push(parse_time(board_time, &vj.name)?);
            }

            transit_data
                .insert_trip(vj.name.clone(), &stops, &board_times, &debark_times, days_pattern)
                .map_err(|err| BuildError::BadTripTimes(vj.name.clone(), err))?;
        }

        for (from_name, to_name, duration) in &self.transfers {
            let from_stop = transit_data
                .stop_by_name(from_name)
                .ok_or_else(|| BuildError::UnknownStop(from_name.clone()))?;
            let to_stop = transit_data
                .stop_by_name(to_name)
                .ok_or_else(|| BuildError::UnknownStop(to_name.clone()))?;
            transit_data.add_transfer(from_stop, to_stop, PositiveDuration::from_seconds(*duration));
        }

        Ok(transit_data)
    }
}

impl<'a> VehicleJourneyBuilder<'a> {
    /// Attach the vehicle journey to a calendar declared with
    /// `TimetableBuilder::calendar`
    pub fn calendar(self, id: &str) -> Self {
        self.builder.vehicle_journeys[self.vj_idx].calendar = id.to_string();
        self
    }

    /// Add a stop time, with a debark (arrival) time and a board
    /// (departure) time given as `HH:MM:SS` strings
    pub fn st(self, stop_name: &str, debark_time: &str, board_time: &str) -> Self {
        self.builder.vehicle_journeys[self.vj_idx].stop_times.push((
            stop_name.to_string(),
            debark_time.to_string(),
            board_time.to_string(),
        ));
        self
    }
}

fn parse_time(string: &str, vj_name: &str) -> Result<SecondsSinceDayStart, BuildError> {
    SecondsSinceDayStart::from_hms_str(string)
        .ok_or_else(|| BuildError::BadTimeFormat(vj_name.to_string(), string.to_string()))
}

#[derive(Debug)]
pub enum BuildError {
    DuplicateVehicleJourney(String),
    NotEnoughStopTimes(String),
    UnknownCalendar(String, String),
    DuplicateStop(String, String),
    BadTimeFormat(String, String),
    BadTripTimes(String, TripTimesError),
    UnknownStop(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::DuplicateVehicleJourney(name) => {
                write!(f, "The vehicle journey {} is defined twice", name)
            }
            BuildError::NotEnoughStopTimes(name) => {
                write!(f, "The vehicle journey {} has less than two stop times", name)
            }
            BuildError::UnknownCalendar(name, calendar) => write!(
                f,
                "The vehicle journey {} refers to the unknown calendar {}",
                name, calendar
            ),
            BuildError::DuplicateStop(name, stop) => write!(
                f,
                "The vehicle journey {} goes through the stop {} twice",
                name, stop
            ),
            BuildError::BadTimeFormat(name, time) => write!(
                f,
                "The vehicle journey {} has a malformed time `{}`",
                name, time
            ),
            BuildError::BadTripTimes(name, err) => {
                write!(f, "The vehicle journey {} has bad times : {}", name, err)
            }
            BuildError::UnknownStop(name) => {
                write!(f, "A transfer refers to the unknown stop {}", name)
            }
        }
    }
}

impl std::error::Error for BuildError {}

pub trait AsDate {
    fn as_date(&self) -> NaiveDate;
}

impl AsDate for &str {
    fn as_date(&self) -> NaiveDate {
        self.parse().expect("invalid date format")
    }
}

impl AsDate for NaiveDate {
    fn as_date(&self) -> NaiveDate {
        *self
    }
}
