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

use crate::time::SecondsSinceDayStart;
use crate::transit_data::data_interface::Data;
use crate::transit_data::{Pattern, Trip};

/// Result of a trip search : the trip found and the time at which it
/// can be boarded at the queried position (its departure time for a
/// board search, its arrival time for an alight search).
#[derive(Debug, Clone, Copy)]
pub struct FoundTrip {
    pub trip: Trip,
    pub trip_time: SecondsSinceDayStart,
}

/// Search for a boardable trip of one pattern.
///
/// One search is created per pattern traversal and queried at each
/// position. When a query uses a target time no better than the
/// previous one, the scan resumes from the previously found trip
/// instead of restarting.
pub trait TripScheduleSearch {
    /// Find the best trip boardable at `position_idx` with the given
    /// `target_time` bound, skipping trips that are not in service.
    ///
    /// When `bound_trip_idx` is given, only trips strictly better
    /// than it are considered : this is the re-boarding rule.
    fn search(
        &mut self,
        target_time: &SecondsSinceDayStart,
        position_idx: usize,
        bound_trip_idx: Option<usize>,
    ) -> Option<FoundTrip>;
}

/// Finds the earliest trip, in service, departing at or after the
/// target time. Used by the forward search.
pub struct TripScheduleBoardSearch<'data, D> {
    data: &'data D,
    pattern: Pattern,
    nb_of_trips: usize,
    binary_search_threshold: usize,
    last_target: Option<SecondsSinceDayStart>,
    resume_idx: usize,
}

impl<'data, D: Data> TripScheduleBoardSearch<'data, D> {
    pub fn new(data: &'data D, pattern: Pattern, binary_search_threshold: usize) -> Self {
        let nb_of_trips = data.nb_of_trips_of(&pattern);
        Self {
            data,
            pattern,
            nb_of_trips,
            binary_search_threshold,
            last_target: None,
            resume_idx: 0,
        }
    }

    // first trip idx whose board time at `position_idx` is >= `target_time`,
    // ignoring the service filter
    fn lower_bound(&self, target_time: &SecondsSinceDayStart, position_idx: usize) -> usize {
        let mut low = 0;
        let mut high = self.nb_of_trips;
        while low < high {
            let mid = low + (high - low) / 2;
            let trip = Trip {
                pattern: self.pattern,
                idx: mid,
            };
            if self.data.board_time_of(&trip, position_idx) < *target_time {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }
}

impl<'data, D: Data> TripScheduleSearch for TripScheduleBoardSearch<'data, D> {
    fn search(
        &mut self,
        target_time: &SecondsSinceDayStart,
        position_idx: usize,
        bound_trip_idx: Option<usize>,
    ) -> Option<FoundTrip> {
        let upper = bound_trip_idx.unwrap_or(self.nb_of_trips).min(self.nb_of_trips);

        // resume from the last found trip when the target did not
        // get earlier, otherwise restart
        let mut idx = match &self.last_target {
            Some(last_target) if target_time >= last_target => self.resume_idx,
            _ if self.nb_of_trips > self.binary_search_threshold => {
                self.lower_bound(target_time, position_idx)
            }
            _ => 0,
        };

        while idx < upper {
            let trip = Trip {
                pattern: self.pattern,
                idx,
            };
            if self.data.is_trip_in_service(&trip) {
                let board_time = self.data.board_time_of(&trip, position_idx);
                if board_time >= *target_time {
                    self.last_target = Some(*target_time);
                    self.resume_idx = idx;
                    return Some(FoundTrip {
                        trip,
                        trip_time: board_time,
                    });
                }
            }
            idx += 1;
        }
        None
    }
}

/// Finds the latest trip, in service, debarking at or before the
/// target time. Used by the backward search.
pub struct TripScheduleAlightSearch<'data, D> {
    data: &'data D,
    pattern: Pattern,
    nb_of_trips: usize,
    binary_search_threshold: usize,
    last_target: Option<SecondsSinceDayStart>,
    resume_idx: usize,
}

impl<'data, D: Data> TripScheduleAlightSearch<'data, D> {
    pub fn new(data: &'data D, pattern: Pattern, binary_search_threshold: usize) -> Self {
        let nb_of_trips = data.nb_of_trips_of(&pattern);
        Self {
            data,
            pattern,
            nb_of_trips,
            binary_search_threshold,
            last_target: None,
            resume_idx: 0,
        }
    }

    // last trip idx whose debark time at `position_idx` is <= `target_time`,
    // ignoring the service filter. None when even the first trip is too late.
    fn upper_bound(&self, target_time: &SecondsSinceDayStart, position_idx: usize) -> Option<usize> {
        let mut low = 0;
        let mut high = self.nb_of_trips;
        while low < high {
            let mid = low + (high - low) / 2;
            let trip = Trip {
                pattern: self.pattern,
                idx: mid,
            };
            if self.data.debark_time_of(&trip, position_idx) <= *target_time {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low.checked_sub(1)
    }
}

impl<'data, D: Data> TripScheduleSearch for TripScheduleAlightSearch<'data, D> {
    fn search(
        &mut self,
        target_time: &SecondsSinceDayStart,
        position_idx: usize,
        bound_trip_idx: Option<usize>,
    ) -> Option<FoundTrip> {
        if self.nb_of_trips == 0 {
            return None;
        }
        // only trips strictly after the bound are acceptable
        let lower = bound_trip_idx.map_or(0, |bound| bound + 1);

        let start = match &self.last_target {
            Some(last_target) if target_time <= last_target => self.resume_idx,
            _ if self.nb_of_trips > self.binary_search_threshold => {
                self.upper_bound(target_time, position_idx)?
            }
            _ => self.nb_of_trips - 1,
        };

        let mut idx = start;
        loop {
            if idx < lower {
                return None;
            }
            let trip = Trip {
                pattern: self.pattern,
                idx,
            };
            if self.data.is_trip_in_service(&trip) {
                let debark_time = self.data.debark_time_of(&trip, position_idx);
                if debark_time <= *target_time {
                    self.last_target = Some(*target_time);
                    self.resume_idx = idx;
                    return Some(FoundTrip {
                        trip,
                        trip_time: debark_time,
                    });
                }
            }
            if idx == 0 {
                return None;
            }
            idx -= 1;
        }
    }
}
