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

use super::DaysSinceDatasetStart;

// we allow 36_600 days which is more than 100 years, and less than u16::MAX days
const MAX_DAYS_IN_CALENDAR: u16 = 100 * 366;

/// Validity period of the data.
/// Resolves a date to its offset since the first allowed day.
#[derive(Debug, Clone)]
pub struct Calendar {
    first_date: NaiveDate, // first date which may be allowed
    last_date: NaiveDate,  // last date (included) which may be allowed
    nb_of_days: u16,       // == (last_date - first_date).num_days() + 1
}

impl Calendar {
    /// Panics if `last_date < first_date` or if the period is longer
    /// than `MAX_DAYS_IN_CALENDAR`.
    pub fn new(first_date: NaiveDate, last_date: NaiveDate) -> Self {
        assert!(
            first_date <= last_date,
            "Calendar must have first_date {} <= last_date {}",
            first_date,
            last_date
        );
        let nb_of_days_i64 = (last_date - first_date).num_days() + 1;
        assert!(
            nb_of_days_i64 <= i64::from(MAX_DAYS_IN_CALENDAR),
            "Calendar period of {} days is too long",
            nb_of_days_i64
        );
        Self {
            first_date,
            last_date,
            nb_of_days: nb_of_days_i64 as u16,
        }
    }

    pub fn nb_of_days(&self) -> u16 {
        self.nb_of_days
    }

    pub fn first_date(&self) -> &NaiveDate {
        &self.first_date
    }

    pub fn last_date(&self) -> &NaiveDate {
        &self.last_date
    }

    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        self.first_date <= *date && *date <= self.last_date
    }

    pub fn date_to_days_since_start(&self, date: &NaiveDate) -> Option<DaysSinceDatasetStart> {
        self.date_to_offset(date)
            .map(|days| DaysSinceDatasetStart { days })
    }

    pub(crate) fn date_to_offset(&self, date: &NaiveDate) -> Option<u16> {
        if *date < self.first_date || *date > self.last_date {
            None
        } else {
            let offset_64: i64 = (*date - self.first_date).num_days();
            // we can cast safely, the offset is within the validity
            // period which has at most MAX_DAYS_IN_CALENDAR days
            Some(offset_64 as u16)
        }
    }
}
