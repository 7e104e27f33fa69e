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

use super::data_interface::{Data, DataIters};
use super::iters::{PatternsVisiting, TransfersAtStop};
use super::{Pattern, Position, Stop, Transfer, TransitData, Trip};
use crate::time::{DaysSinceDatasetStart, PositiveDuration, SecondsSinceDayStart};

/// The view of a `TransitData` for one search day.
///
/// The underlying data is shared read-only between searches, the view
/// is cheap and owned by one search. `init()` precomputes the
/// in-service mask for the day so that `is_trip_in_service` is a
/// plain lookup in the pattern scan.
pub struct TransitDataFiltered<'data> {
    transit_data: &'data TransitData,
    day: DaysSinceDatasetStart,
    // trip_in_service[pattern.idx][trip.idx]
    trip_in_service: Vec<Vec<bool>>,
}

impl<'data> TransitDataFiltered<'data> {
    pub fn new(transit_data: &'data TransitData, day: DaysSinceDatasetStart) -> Self {
        Self {
            transit_data,
            day,
            trip_in_service: Vec::new(),
        }
    }

    pub fn transit_data(&self) -> &'data TransitData {
        self.transit_data
    }
}

impl<'data> Data for TransitDataFiltered<'data> {
    fn init(&mut self) {
        let transit_data = self.transit_data;
        self.trip_in_service = transit_data
            .patterns_data
            .iter()
            .map(|pattern_data| {
                pattern_data
                    .trip_days
                    .iter()
                    .map(|days_pattern| {
                        transit_data
                            .days_patterns
                            .is_allowed(days_pattern, &self.day)
                    })
                    .collect()
            })
            .collect();
    }

    fn nb_of_stops(&self) -> usize {
        self.transit_data.nb_of_stops()
    }

    fn nb_of_patterns(&self) -> usize {
        self.transit_data.nb_of_patterns()
    }

    fn nb_of_positions(&self, pattern: &Pattern) -> usize {
        self.transit_data.nb_of_positions(pattern)
    }

    fn stop_at(&self, pattern: &Pattern, position_idx: usize) -> Stop {
        self.transit_data.stop_at(pattern, position_idx)
    }

    fn nb_of_trips_of(&self, pattern: &Pattern) -> usize {
        self.transit_data.nb_of_trips_of(pattern)
    }

    fn board_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.transit_data.board_time_of(trip, position_idx)
    }

    fn debark_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.transit_data.debark_time_of(trip, position_idx)
    }

    fn is_trip_in_service(&self, trip: &Trip) -> bool {
        debug_assert!(
            !self.trip_in_service.is_empty(),
            "is_trip_in_service called before init()"
        );
        self.trip_in_service[trip.pattern.idx][trip.idx]
    }

    fn transfer(&self, transfer: &Transfer) -> (Stop, PositiveDuration) {
        self.transit_data.transfer(transfer)
    }

    fn transfer_start_stop(&self, transfer: &Transfer) -> Stop {
        self.transit_data.transfer_start_stop(transfer)
    }

    fn is_upstream(&self, upstream: &Position, downstream: &Position) -> bool {
        self.transit_data.is_upstream(upstream, downstream)
    }
}

impl<'data, 'a> DataIters<'a> for TransitDataFiltered<'data> {
    type PatternsVisiting = PatternsVisiting<'a>;
    fn patterns_visiting(&'a self, stops: &'a [Stop]) -> Self::PatternsVisiting {
        self.transit_data.patterns_visiting(stops)
    }

    type TransfersAtStop = TransfersAtStop<'a>;
    fn outgoing_transfers_at(&'a self, from_stop: &Stop) -> Self::TransfersAtStop {
        self.transit_data.outgoing_transfers_at(from_stop)
    }

    fn incoming_transfers_at(&'a self, to_stop: &Stop) -> Self::TransfersAtStop {
        self.transit_data.incoming_transfers_at(to_stop)
    }
}
