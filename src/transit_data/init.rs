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

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::{Pattern, PatternData, Stop, StopData, TransitData, Trip};
use crate::time::{
    days_patterns::{DaysPattern, DaysPatterns},
    Calendar, PositiveDuration, SecondsSinceDayStart,
};

impl TransitData {
    pub(crate) fn new(calendar: Calendar) -> Self {
        let nb_of_days: usize = calendar.nb_of_days().into();
        Self {
            stops_data: Vec::new(),
            patterns_data: Vec::new(),
            stop_name_to_stop: HashMap::new(),
            stop_sequence_to_patterns: BTreeMap::new(),
            calendar,
            days_patterns: DaysPatterns::new(nb_of_days),
        }
    }

    pub(crate) fn add_or_get_stop(&mut self, name: &str) -> Stop {
        if let Some(stop) = self.stop_name_to_stop.get(name) {
            return *stop;
        }
        let stop = Stop {
            idx: self.stops_data.len(),
        };
        self.stops_data.push(StopData {
            name: name.to_string(),
            patterns: Vec::new(),
            outgoing_transfers: Vec::new(),
            incoming_transfers: Vec::new(),
        });
        self.stop_name_to_stop.insert(name.to_string(), stop);
        stop
    }

    pub(crate) fn add_transfer(&mut self, from_stop: Stop, to_stop: Stop, duration: PositiveDuration) {
        let idx_in_from_transfers = self.stops_data[from_stop.idx].outgoing_transfers.len();
        self.stops_data[from_stop.idx]
            .outgoing_transfers
            .push((to_stop, duration));
        self.stops_data[to_stop.idx]
            .incoming_transfers
            .push((from_stop, duration, idx_in_from_transfers));
    }

    // Insert the trip in a pattern over `stops` if its board and debark
    // times are coherent, in a way that keeps every pattern's trips
    // totally ordered by time. A trip that overtakes the trips of every
    // candidate pattern starts a new sibling pattern.
    pub(crate) fn insert_trip(
        &mut self,
        name: String,
        stops: &[Stop],
        board_times: &[SecondsSinceDayStart],
        debark_times: &[SecondsSinceDayStart],
        days: DaysPattern,
    ) -> Result<Trip, TripTimesError> {
        let nb_of_positions = stops.len();
        assert!(nb_of_positions >= 2);
        assert!(nb_of_positions == board_times.len());
        assert!(nb_of_positions == debark_times.len());
        inspect(board_times, debark_times)?;

        let candidate_patterns: Vec<Pattern> = self
            .stop_sequence_to_patterns
            .get(stops)
            .cloned()
            .unwrap_or_default();

        for pattern in candidate_patterns.iter() {
            let pattern_data = &mut self.patterns_data[pattern.idx];
            let has_insert_idx = pattern_data.find_insert_idx(board_times, debark_times);
            if let Some(insert_idx) = has_insert_idx {
                pattern_data.do_insert(name, board_times, debark_times, days, insert_idx);
                return Ok(Trip {
                    pattern: *pattern,
                    idx: insert_idx,
                });
            }
        }

        let pattern = Pattern {
            idx: self.patterns_data.len(),
        };
        let mut pattern_data = PatternData {
            stops: stops.to_vec(),
            board_times_by_position: vec![Vec::new(); nb_of_positions],
            debark_times_by_position: vec![Vec::new(); nb_of_positions],
            trip_days: Vec::new(),
            trip_names: Vec::new(),
        };
        pattern_data.do_insert(name, board_times, debark_times, days, 0);
        self.patterns_data.push(pattern_data);
        self.stop_sequence_to_patterns
            .entry(stops.to_vec())
            .or_insert_with(Vec::new)
            .push(pattern);
        // a pattern's stops are pairwise distinct, so each stop is
        // registered exactly once
        for stop in stops {
            self.stops_data[stop.idx].patterns.push(pattern);
        }
        Ok(Trip { pattern, idx: 0 })
    }
}

impl PatternData {
    fn nb_of_trips(&self) -> usize {
        self.trip_names.len()
    }

    // Index at which the candidate trip can be inserted while keeping
    // the trips totally ordered by time, or None when the candidate is
    // not comparable with some existing trip.
    fn find_insert_idx(
        &self,
        board_times: &[SecondsSinceDayStart],
        debark_times: &[SecondsSinceDayStart],
    ) -> Option<usize> {
        let nb_of_trips = self.nb_of_trips();
        for trip_idx in 0..nb_of_trips {
            match self.partial_cmp_with_trip(board_times, debark_times, trip_idx)? {
                Ordering::Less | Ordering::Equal => {
                    // every previous trip compared Greater, and trips
                    // after trip_idx are above it by transitivity
                    return Some(trip_idx);
                }
                Ordering::Greater => continue,
            }
        }
        Some(nb_of_trips)
    }

    fn do_insert(
        &mut self,
        name: String,
        board_times: &[SecondsSinceDayStart],
        debark_times: &[SecondsSinceDayStart],
        days: DaysPattern,
        insert_idx: usize,
    ) {
        for (position, (board_time, debark_time)) in
            board_times.iter().zip(debark_times.iter()).enumerate()
        {
            self.board_times_by_position[position].insert(insert_idx, *board_time);
            self.debark_times_by_position[position].insert(insert_idx, *debark_time);
        }
        self.trip_days.insert(insert_idx, days);
        self.trip_names.insert(insert_idx, name);
    }

    // Compare the candidate trip with the trip at `trip_idx`, position
    // by position, over both its board and its debark times.
    //
    // Returns
    //    - Some(Equal)   when the two trips have the same times everywhere
    //    - Some(Less)    when the candidate is everywhere no later
    //    - Some(Greater) when the candidate is everywhere no earlier
    //    - None when the two trips overtake each other
    fn partial_cmp_with_trip(
        &self,
        board_times: &[SecondsSinceDayStart],
        debark_times: &[SecondsSinceDayStart],
        trip_idx: usize,
    ) -> Option<Ordering> {
        debug_assert!(board_times.len() == self.board_times_by_position.len());
        let mut ordering = Ordering::Equal;
        for (position, (board_time, debark_time)) in
            board_times.iter().zip(debark_times.iter()).enumerate()
        {
            let trip_board_time = self.board_times_by_position[position][trip_idx];
            let trip_debark_time = self.debark_times_by_position[position][trip_idx];
            let position_cmps = [
                board_time.cmp(&trip_board_time),
                debark_time.cmp(&trip_debark_time),
            ];
            for position_cmp in position_cmps {
                if position_cmp == Ordering::Equal {
                    continue;
                }
                if ordering == Ordering::Equal {
                    ordering = position_cmp;
                } else if position_cmp != ordering {
                    // earlier at one position, later at another
                    return None;
                }
            }
        }
        Some(ordering)
    }
}

fn inspect(
    board_times: &[SecondsSinceDayStart],
    debark_times: &[SecondsSinceDayStart],
) -> Result<(), TripTimesError> {
    for (upstream, times) in board_times.windows(2).enumerate() {
        if times[1] < times[0] {
            let position_pair = PositionPair {
                upstream,
                downstream: upstream + 1,
            };
            return Err(TripTimesError::DecreasingBoardTime(position_pair));
        }
    }

    for (upstream, times) in debark_times.windows(2).enumerate() {
        if times[1] < times[0] {
            let position_pair = PositionPair {
                upstream,
                downstream: upstream + 1,
            };
            return Err(TripTimesError::DecreasingDebarkTime(position_pair));
        }
    }

    for (position, (board_time, debark_time)) in
        board_times.iter().zip(debark_times.iter()).enumerate()
    {
        // the vehicle cannot leave a stop before having reached it
        if board_time < debark_time {
            return Err(TripTimesError::BoardBeforeDebark(position));
        }
    }

    for (upstream, (board_time, debark_time)) in
        board_times.iter().zip(debark_times.iter().skip(1)).enumerate()
    {
        // riding to the next position must not go back in time
        if board_time > debark_time {
            let position_pair = PositionPair {
                upstream,
                downstream: upstream + 1,
            };
            return Err(TripTimesError::DebarkBeforeUpstreamBoard(position_pair));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPair {
    pub upstream: usize,
    pub downstream: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripTimesError {
    DebarkBeforeUpstreamBoard(PositionPair), // board_time[upstream] > debark_time[downstream]
    DecreasingBoardTime(PositionPair),       // board_time[upstream] > board_time[downstream]
    DecreasingDebarkTime(PositionPair),      // debark_time[upstream] > debark_time[downstream]
    BoardBeforeDebark(usize),                // board_time[position] < debark_time[position]
}

impl std::fmt::Display for TripTimesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripTimesError::DebarkBeforeUpstreamBoard(pair) => write!(
                f,
                "Debark time at position {} is before the board time at upstream position {}",
                pair.downstream, pair.upstream
            ),
            TripTimesError::DecreasingBoardTime(pair) => write!(
                f,
                "Board time at position {} is before the board time at upstream position {}",
                pair.downstream, pair.upstream
            ),
            TripTimesError::DecreasingDebarkTime(pair) => write!(
                f,
                "Debark time at position {} is before the debark time at upstream position {}",
                pair.downstream, pair.upstream
            ),
            TripTimesError::BoardBeforeDebark(position) => write!(
                f,
                "Board time at position {} is before the debark time at the same position",
                position
            ),
        }
    }
}

impl std::error::Error for TripTimesError {}
