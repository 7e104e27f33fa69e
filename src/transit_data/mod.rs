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

pub mod data_interface;
pub mod filtered;
pub mod init;
pub mod iters;

use std::collections::{BTreeMap, HashMap};

use crate::time::{
    days_patterns::{DaysPattern, DaysPatterns},
    Calendar, PositiveDuration, SecondsSinceDayStart,
};

/// A location where a vehicle can be boarded into or debarked from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stop {
    pub(crate) idx: usize,
}

/// An ordered sequence of pairwise distinct `Stop`s, shared by a set
/// of trips kept sorted by time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern {
    pub(crate) idx: usize,
}

/// Identify a step along a `Pattern`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub pattern: Pattern,
    pub idx: usize,
}

/// A trip of a vehicle along a `Pattern`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    pub pattern: Pattern,
    pub idx: usize,
}

/// Identify a foot transfer between two `Stop`s.
/// The handle points into the outgoing transfers of its start stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub(crate) stop: Stop,
    pub(crate) idx_in_stop_transfers: usize,
}

impl Stop {
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl Position {
    pub(crate) fn new(pattern: Pattern, idx: usize) -> Self {
        Self { pattern, idx }
    }
}

#[derive(Debug)]
pub(crate) struct StopData {
    pub(crate) name: String,
    pub(crate) patterns: Vec<Pattern>,
    pub(crate) outgoing_transfers: Vec<(Stop, PositiveDuration)>,
    // (start stop, duration, index in the start stop's outgoing transfers)
    pub(crate) incoming_transfers: Vec<(Stop, PositiveDuration, usize)>,
}

#[derive(Debug)]
pub(crate) struct PatternData {
    pub(crate) stops: Vec<Stop>,

    /// `board_times_by_position[position][trip]`
    ///   is the time at which a traveler waiting
    ///   at `position` can board `trip`.
    /// Trips are ordered by increasing time,
    ///  so for each `position` the vector
    ///  board_times_by_position[position] is sorted by increasing times
    pub(crate) board_times_by_position: Vec<Vec<SecondsSinceDayStart>>,

    /// `debark_times_by_position[position][trip]`
    ///   is the time at which a traveler being inside `trip`
    ///   will debark at `position`.
    /// Trips are ordered by increasing time
    pub(crate) debark_times_by_position: Vec<Vec<SecondsSinceDayStart>>,

    pub(crate) trip_days: Vec<DaysPattern>,
    pub(crate) trip_names: Vec<String>,
}

/// Memory resident timetable : stops, patterns with their trips,
/// transfers and the service calendar. Immutable once built, shared
/// read-only between concurrent searches.
#[derive(Debug)]
pub struct TransitData {
    pub(crate) stops_data: Vec<StopData>,
    pub(crate) patterns_data: Vec<PatternData>,
    pub(crate) stop_name_to_stop: HashMap<String, Stop>,
    // patterns sharing the same stop sequence (trips that overtake
    // each other are kept in sibling patterns)
    pub(crate) stop_sequence_to_patterns: BTreeMap<Vec<Stop>, Vec<Pattern>>,
    pub(crate) calendar: Calendar,
    pub(crate) days_patterns: DaysPatterns,
}

impl TransitData {
    pub fn nb_of_stops(&self) -> usize {
        self.stops_data.len()
    }

    pub fn nb_of_patterns(&self) -> usize {
        self.patterns_data.len()
    }

    pub fn patterns(&self) -> impl Iterator<Item = Pattern> {
        (0..self.patterns_data.len()).map(|idx| Pattern { idx })
    }

    pub fn nb_of_trips(&self) -> usize {
        self.patterns_data
            .iter()
            .map(|pattern_data| pattern_data.trip_names.len())
            .sum()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn stop_by_name(&self, name: &str) -> Option<Stop> {
        self.stop_name_to_stop.get(name).copied()
    }

    pub fn stop_name(&self, stop: &Stop) -> &str {
        &self.stop_data(stop).name
    }

    pub fn trip_name(&self, trip: &Trip) -> &str {
        &self.pattern_data(&trip.pattern).trip_names[trip.idx]
    }

    pub fn nb_of_positions(&self, pattern: &Pattern) -> usize {
        self.pattern_data(pattern).stops.len()
    }

    pub fn stop_at(&self, pattern: &Pattern, position_idx: usize) -> Stop {
        let pattern_data = self.pattern_data(pattern);
        assert!(
            position_idx < pattern_data.stops.len(),
            "Position {} is out of pattern {} which has {} positions",
            position_idx,
            pattern.idx,
            pattern_data.stops.len()
        );
        pattern_data.stops[position_idx]
    }

    pub fn nb_of_trips_of(&self, pattern: &Pattern) -> usize {
        self.pattern_data(pattern).trip_names.len()
    }

    /// Time at which a traveler waiting at `position_idx` can board `trip`
    pub fn board_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.pattern_data(&trip.pattern).board_times_by_position[position_idx][trip.idx]
    }

    /// Time at which a traveler inside `trip` debarks at `position_idx`
    pub fn debark_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.pattern_data(&trip.pattern).debark_times_by_position[position_idx][trip.idx]
    }

    pub fn is_upstream(&self, upstream: &Position, downstream: &Position) -> bool {
        assert!(
            upstream.pattern == downstream.pattern,
            "Cannot compare positions of patterns {} and {}",
            upstream.pattern.idx,
            downstream.pattern.idx
        );
        upstream.idx < downstream.idx
    }

    /// End stop and duration of `transfer`
    pub fn transfer(&self, transfer: &Transfer) -> (Stop, PositiveDuration) {
        self.stop_data(&transfer.stop).outgoing_transfers[transfer.idx_in_stop_transfers]
    }

    pub fn transfer_start_stop(&self, transfer: &Transfer) -> Stop {
        transfer.stop
    }

    pub(crate) fn stop_data(&self, stop: &Stop) -> &StopData {
        assert!(
            stop.idx < self.stops_data.len(),
            "Stop {} is out of the data which has {} stops",
            stop.idx,
            self.stops_data.len()
        );
        &self.stops_data[stop.idx]
    }

    pub(crate) fn pattern_data(&self, pattern: &Pattern) -> &PatternData {
        assert!(
            pattern.idx < self.patterns_data.len(),
            "Pattern {} is out of the data which has {} patterns",
            pattern.idx,
            self.patterns_data.len()
        );
        &self.patterns_data[pattern.idx]
    }
}
