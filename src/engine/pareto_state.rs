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

use tracing::warn;

use crate::response;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::data_interface::{Data, DataIters};
use crate::transit_data::{Pattern, Stop, Transfer, Trip};

use super::journeys_tree::{Debarked, JourneysTree, Onboard, Waiting, WaitingData};
use super::pareto_front::ParetoFront;
use super::touched_stops::TouchedStops;
use super::transit_calculator::{Criteria, TransitCalculator};
use super::trip_search::TripScheduleSearch;
use super::worker_state::{
    backward_vehicle_leg, forward_vehicle_leg, is_lower_journey_criteria, journey_criteria,
    TransitLeg, WorkerState,
};

/// A moment of a journey present in a stop front : either waiting at
/// the stop after a street move, or just debarked from a vehicle.
#[derive(Debug, Clone, Copy)]
enum StopJourney {
    Waiting(Waiting),
    Debarked(Debarked),
}

// a reachable destination, recorded the moment its egress stop was
// improved by transit
#[derive(Debug, Clone, Copy)]
struct ArrivedJourney {
    debarked: Debarked,
    dest_time: SecondsSinceDayStart,
    exit_fallback: PositiveDuration,
}

/// Multi-criterion state : maintains, per stop, a Pareto frontier
/// over (time, number of vehicle legs), with a back-pointer into the
/// journeys tree for each frontier element.
///
/// The frontiers are never reset between iterations of the minute
/// loop : dominance against them is the multi-criterion form of the
/// target pruning rule, and makes Range-RAPTOR reuse valid.
pub struct ParetoState {
    max_nb_of_legs: usize,
    round: usize,

    journeys_tree: JourneysTree,
    stop_fronts: Vec<ParetoFront<StopJourney, Criteria>>, // map a stop to its frontier

    touched_previous_round: TouchedStops,
    touched_by_transit: TouchedStops,
    touched_by_transfer: TouchedStops,

    // trips boarded during the current pattern traversal
    onboard_front: Vec<(Onboard, Trip)>,

    // per-call scratch, reused between rounds
    board_scratch: Vec<(StopJourney, Criteria)>,
    transfer_scratch: Vec<(Debarked, Criteria)>,

    arrived: Vec<ArrivedJourney>,

    exit_fallbacks: Vec<Option<PositiveDuration>>, // map a stop to its egress duration
}

impl ParetoState {
    pub fn new(
        nb_of_stops: usize,
        max_nb_of_transfers: u8,
        exit_stop_and_fallback_duration: &[(Stop, PositiveDuration)],
    ) -> Self {
        let max_nb_of_legs = usize::from(max_nb_of_transfers) + 1;
        let mut exit_fallbacks = vec![None; nb_of_stops];
        for (stop, fallback) in exit_stop_and_fallback_duration {
            let entry = &mut exit_fallbacks[stop.idx()];
            match entry {
                Some(previous) if *previous <= *fallback => {}
                _ => *entry = Some(*fallback),
            }
        }
        Self {
            max_nb_of_legs,
            round: 0,
            journeys_tree: JourneysTree::new(),
            stop_fronts: vec![ParetoFront::new(); nb_of_stops],
            touched_previous_round: TouchedStops::new(nb_of_stops),
            touched_by_transit: TouchedStops::new(nb_of_stops),
            touched_by_transfer: TouchedStops::new(nb_of_stops),
            onboard_front: Vec::new(),
            board_scratch: Vec::new(),
            transfer_scratch: Vec::new(),
            arrived: Vec::new(),
            exit_fallbacks,
        }
    }

    // the best trip currently boarded, used to bound re-boarding
    fn best_onboard_trip_idx<'data, D, Cal>(&self, cal: &Cal) -> Option<usize>
    where
        D: Data + DataIters<'data>,
        Cal: TransitCalculator<'data, D>,
    {
        self.onboard_front
            .iter()
            .map(|(_, trip)| trip.idx)
            .reduce(|a, b| if cal.is_earlier_trip(a, b) { a } else { b })
    }

    fn build_journey<'data, D, Cal>(
        &self,
        data: &'data D,
        cal: &Cal,
        arrived: &ArrivedJourney,
    ) -> Result<response::Journey, response::BadJourney>
    where
        D: Data + DataIters<'data>,
        Cal: TransitCalculator<'data, D>,
    {
        let mut legs: Vec<TransitLeg> = Vec::new();
        let mut transfers: Vec<Option<Transfer>> = Vec::new();

        let mut debarked = arrived.debarked;
        let (access_fallback, access_minute) = loop {
            let (debark_position, onboard) = *self.journeys_tree.debarked(&debarked);
            let (trip, board_position, waiting) = *self.journeys_tree.onboard(&onboard);
            let leg = TransitLeg {
                trip,
                board_position,
                board_time: cal.trip_board_time(&trip, board_position),
                alight_position: debark_position,
                alight_time: cal.trip_alight_time(&trip, debark_position),
            };
            legs.push(leg);
            match self.journeys_tree.waiting(&waiting) {
                WaitingData::Departure { fallback, minute } => break (*fallback, *minute),
                WaitingData::Transfer(transfer, prev_debarked) => {
                    transfers.push(Some(*transfer));
                    debarked = *prev_debarked;
                }
                WaitingData::SameStop(prev_debarked) => {
                    transfers.push(None);
                    debarked = *prev_debarked;
                }
            }
        };

        match cal.direction() {
            crate::config::Direction::Forward => {
                legs.reverse();
                transfers.reverse();
                let first_vehicle = forward_vehicle_leg(&legs[0]);
                let connections = transfers
                    .into_iter()
                    .zip(legs.iter().skip(1).map(forward_vehicle_leg));
                response::Journey::new(
                    access_minute,
                    access_fallback,
                    first_vehicle,
                    connections,
                    arrived.exit_fallback,
                    data,
                )
            }
            crate::config::Direction::Backward => {
                let first_vehicle = backward_vehicle_leg(&legs[0]);
                let connections = transfers
                    .into_iter()
                    .zip(legs.iter().skip(1).map(backward_vehicle_leg));
                response::Journey::new(
                    arrived.dest_time,
                    arrived.exit_fallback,
                    first_vehicle,
                    connections,
                    access_fallback,
                    data,
                )
            }
        }
    }
}

impl<'data, D, Cal> WorkerState<'data, D, Cal> for ParetoState
where
    D: Data + DataIters<'data>,
    Cal: TransitCalculator<'data, D>,
{
    fn setup_iteration(&mut self, _minute: &SecondsSinceDayStart) {
        self.round = 0;
        self.touched_previous_round.clear();
        self.touched_by_transit.clear();
        self.touched_by_transfer.clear();
        self.onboard_front.clear();
    }

    fn set_initial_time_for_iteration(
        &mut self,
        cal: &Cal,
        stop: &Stop,
        fallback: &PositiveDuration,
        minute: &SecondsSinceDayStart,
    ) {
        let has_time = cal.time_after_walk(minute, fallback);
        let time = match has_time {
            Some(time) => time,
            None => return,
        };
        let criteria = Criteria {
            time,
            nb_of_legs: 0,
        };
        let is_lower = |a: &Criteria, b: &Criteria| cal.is_lower_criteria(a, b);
        if self.stop_fronts[stop.idx()].dominates(&criteria, is_lower) {
            return;
        }
        let waiting = self.journeys_tree.depart(*fallback, *minute);
        self.stop_fronts[stop.idx()].add_and_remove_elements_dominated(
            StopJourney::Waiting(waiting),
            criteria,
            is_lower,
        );
        self.touched_by_transfer.add(*stop);
    }

    fn is_new_round_available(&self) -> bool {
        let touched = !self.touched_by_transit.is_empty() || !self.touched_by_transfer.is_empty();
        touched && self.round < self.max_nb_of_legs
    }

    fn prepare_for_next_round(&mut self) {
        self.round += 1;
        self.touched_previous_round.clear();
        for stop in self.touched_by_transit.as_slice() {
            self.touched_previous_round.add(*stop);
        }
        for stop in self.touched_by_transfer.as_slice() {
            self.touched_previous_round.add(*stop);
        }
        self.touched_by_transit.clear();
        self.touched_by_transfer.clear();
    }

    fn round(&self) -> usize {
        self.round
    }

    fn stops_touched_previous_round(&self) -> &[Stop] {
        self.touched_previous_round.as_slice()
    }

    fn stops_touched_by_transit(&self) -> &[Stop] {
        self.touched_by_transit.as_slice()
    }

    fn prepare_pattern(&mut self, _pattern: &Pattern) {
        self.onboard_front.clear();
    }

    fn transit_at_position(
        &mut self,
        data: &'data D,
        cal: &Cal,
        trip_search: &mut Cal::TripSearch,
        pattern: &Pattern,
        position_idx: usize,
    ) {
        let stop = data.stop_at(pattern, position_idx);
        let round_legs = self.round as u8;

        // debark every boarded trip that improves this stop
        for onboard_idx in 0..self.onboard_front.len() {
            let (onboard, trip) = self.onboard_front[onboard_idx];
            let alight_time = cal.trip_alight_time(&trip, position_idx);
            let criteria = Criteria {
                time: alight_time,
                nb_of_legs: round_legs,
            };
            let is_lower = |a: &Criteria, b: &Criteria| cal.is_lower_criteria(a, b);
            if self.stop_fronts[stop.idx()].dominates(&criteria, is_lower) {
                continue;
            }
            let debarked = self.journeys_tree.debark(&onboard, position_idx);
            self.stop_fronts[stop.idx()].add_and_remove_elements_dominated(
                StopJourney::Debarked(debarked),
                criteria,
                is_lower,
            );
            self.touched_by_transit.add(stop);
            // the destination is one egress leg away from a transit arrival
            if let Some(exit_fallback) = self.exit_fallbacks[stop.idx()] {
                if let Some(dest_time) = cal.time_after_walk(&alight_time, &exit_fallback) {
                    self.arrived.push(ArrivedJourney {
                        debarked,
                        dest_time,
                        exit_fallback,
                    });
                }
            }
        }

        // board or re-board from the previous round frontier elements
        if self.touched_previous_round.contains(&stop)
            && cal.can_board_at(position_idx, data.nb_of_positions(pattern))
        {
            let previous_round_legs = (self.round - 1) as u8;
            self.board_scratch.clear();
            for (id, criteria) in self.stop_fronts[stop.idx()].iter() {
                if criteria.nb_of_legs == previous_round_legs {
                    self.board_scratch.push((*id, *criteria));
                }
            }
            for scratch_idx in 0..self.board_scratch.len() {
                let (id, criteria) = self.board_scratch[scratch_idx];
                let has_board_time = cal.board_time_with_slack(&criteria.time);
                let earliest_board_time = match has_board_time {
                    Some(time) => time,
                    None => continue,
                };
                // re-boarding wins only for a strictly earlier trip
                let bound = self.best_onboard_trip_idx::<D, Cal>(cal);
                if let Some(found) = trip_search.search(&earliest_board_time, position_idx, bound) {
                    let waiting = match id {
                        StopJourney::Waiting(waiting) => waiting,
                        StopJourney::Debarked(debarked) => self.journeys_tree.stay(&debarked),
                    };
                    let onboard = self.journeys_tree.board(&waiting, &found.trip, position_idx);
                    // the found trip is strictly better than every boarded one
                    self.onboard_front.clear();
                    self.onboard_front.push((onboard, found.trip));
                }
            }
        }
    }

    fn transits_for_round_complete(&mut self) {}

    fn transfer_to_stops(
        &mut self,
        cal: &Cal,
        from_stop: &Stop,
        transfers: <D as DataIters<'data>>::TransfersAtStop,
    ) {
        let round_legs = self.round as u8;
        // snapshot the transit arrivals of this round : the stop front
        // may be modified while relaxing (loop transfers)
        self.transfer_scratch.clear();
        for (id, criteria) in self.stop_fronts[from_stop.idx()].iter() {
            if criteria.nb_of_legs == round_legs {
                if let StopJourney::Debarked(debarked) = id {
                    self.transfer_scratch.push((*debarked, *criteria));
                }
            }
        }
        if self.transfer_scratch.is_empty() {
            return;
        }
        for (to_stop, duration, transfer) in transfers {
            for scratch_idx in 0..self.transfer_scratch.len() {
                let (debarked, criteria) = self.transfer_scratch[scratch_idx];
                let has_time = cal.time_after_walk(&criteria.time, &duration);
                let time = match has_time {
                    Some(time) => time,
                    None => continue,
                };
                let new_criteria = Criteria {
                    time,
                    nb_of_legs: criteria.nb_of_legs,
                };
                let is_lower = |a: &Criteria, b: &Criteria| cal.is_lower_criteria(a, b);
                if self.stop_fronts[to_stop.idx()].dominates(&new_criteria, is_lower) {
                    continue;
                }
                let waiting = self.journeys_tree.transfer(&debarked, &transfer);
                self.stop_fronts[to_stop.idx()].add_and_remove_elements_dominated(
                    StopJourney::Waiting(waiting),
                    new_criteria,
                    is_lower,
                );
                self.touched_by_transfer.add(to_stop);
            }
        }
    }

    fn transfers_for_round_complete(&mut self) {}

    fn iteration_complete(&mut self, _data: &'data D, _cal: &Cal) {
        // nothing to copy : the journeys tree and the arrived list
        // both survive the iterations of the minute loop
    }

    fn extract_paths(&mut self, data: &'data D, cal: &Cal) -> Vec<response::Journey> {
        let mut front: ParetoFront<response::Journey, super::worker_state::JourneyCriteria> =
            ParetoFront::new();
        for arrived in &self.arrived {
            match self.build_journey(data, cal, arrived) {
                Ok(journey) => {
                    let criteria = journey_criteria(&journey);
                    front.add(journey, criteria, is_lower_journey_criteria);
                }
                Err(err) => {
                    warn!("An invalid journey was dropped : {}", err);
                    debug_assert!(false, "extracted an invalid journey : {}", err);
                }
            }
        }
        let mut journeys: Vec<response::Journey> =
            front.iter().map(|(journey, _)| journey.clone()).collect();
        journeys.sort_by_key(|journey| {
            (
                journey.departure_datetime,
                journey.arrival_datetime(),
                journey.nb_of_transfers(),
            )
        });
        journeys
    }
}
