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

use chrono::NaiveDate;

use crate::config::{CriteriaType, Direction};
use crate::time::{DaysSinceDatasetStart, PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::{Stop, TransitData};

/// One journey planning request.
///
/// Forward, the window `[earliest_datetime, latest_datetime]` holds
/// the departure minutes to explore. Backward, it holds the arrival
/// minutes.
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub earliest_datetime: SecondsSinceDayStart,
    pub latest_datetime: SecondsSinceDayStart,
    pub date: NaiveDate,
    /// access legs : a stop and the street duration to reach it
    pub departures_stop_and_fallback_duration: Vec<(Stop, PositiveDuration)>,
    /// egress legs : a stop and the street duration to leave it
    pub arrivals_stop_and_fallback_duration: Vec<(Stop, PositiveDuration)>,
    pub direction: Direction,
    pub criteria: CriteriaType,
}

#[derive(Debug)]
pub enum BadRequest {
    NoValidDepartureStop,
    NoValidArrivalStop,
    BadSearchWindow,
    DateOutOfValidityPeriod,
    UnknownStop(usize),
}

impl std::fmt::Display for BadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadRequest::NoValidDepartureStop => {
                write!(f, "No valid departure stop among the provided ones.")
            }
            BadRequest::NoValidArrivalStop => {
                write!(f, "No valid arrival stop among the provided ones.")
            }
            BadRequest::BadSearchWindow => {
                write!(
                    f,
                    "The requested search window ends before it starts."
                )
            }
            BadRequest::DateOutOfValidityPeriod => {
                write!(
                    f,
                    "The requested date is out of the validity period of the data."
                )
            }
            BadRequest::UnknownStop(idx) => {
                write!(f, "The stop {} does not belong to the data.", idx)
            }
        }
    }
}

impl std::error::Error for BadRequest {}

impl RequestInput {
    /// Fail fast on inputs that would corrupt the search. Returns the
    /// day of the search resolved against the calendar.
    pub fn validate(&self, transit_data: &TransitData) -> Result<DaysSinceDatasetStart, BadRequest> {
        if self.departures_stop_and_fallback_duration.is_empty() {
            return Err(BadRequest::NoValidDepartureStop);
        }
        if self.arrivals_stop_and_fallback_duration.is_empty() {
            return Err(BadRequest::NoValidArrivalStop);
        }
        if self.earliest_datetime > self.latest_datetime {
            return Err(BadRequest::BadSearchWindow);
        }
        let nb_of_stops = transit_data.nb_of_stops();
        let all_stops = self
            .departures_stop_and_fallback_duration
            .iter()
            .chain(self.arrivals_stop_and_fallback_duration.iter());
        for (stop, _) in all_stops {
            if stop.idx() >= nb_of_stops {
                return Err(BadRequest::UnknownStop(stop.idx()));
            }
        }
        transit_data
            .calendar()
            .date_to_days_since_start(&self.date)
            .ok_or(BadRequest::DateOutOfValidityPeriod)
    }
}
