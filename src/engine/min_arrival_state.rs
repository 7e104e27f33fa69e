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

use super::pareto_front::ParetoFront;
use super::touched_stops::TouchedStops;
use super::transit_calculator::TransitCalculator;
use super::worker_state::{
    backward_vehicle_leg, forward_vehicle_leg, is_lower_journey_criteria, journey_criteria,
    JourneyCriteria, TransitLeg, WorkerState,
};

#[derive(Debug, Clone, Copy)]
enum ArrivedBy {
    Access {
        fallback: PositiveDuration,
        minute: SecondsSinceDayStart,
    },
    Transit(TransitLeg),
    // a transfer arrival embeds the transit leg it walked away from,
    // since the round entry of its start stop may be overwritten
    Transfer {
        transfer: Transfer,
        source: TransitLeg,
    },
}

#[derive(Debug, Clone, Copy)]
struct StopArrival {
    time: SecondsSinceDayStart,
    arrived_by: ArrivedBy,
}

#[derive(Debug, Clone, Copy)]
struct OnboardTrip {
    trip: Trip,
    board_position: usize,
    board_time: SecondsSinceDayStart,
}

// a reachable destination, recorded the moment its egress stop was
// improved by transit
#[derive(Debug, Clone, Copy)]
struct DestinationCandidate {
    round: usize,
    dest_time: SecondsSinceDayStart,
    exit_fallback: PositiveDuration,
    final_leg: TransitLeg,
}

/// Single-criterion state : tracks, per stop, the best known time
/// across all rounds and iterations, plus per-round arrival records
/// used for path reconstruction.
///
/// The improvement rule is the target pruning one : a round entry is
/// written only when it beats the best known time of its stop, and
/// the best known time is never reset between iterations of the
/// minute loop.
pub struct MinArrivalState {
    max_nb_of_legs: usize,
    round: usize,

    best_times: Vec<Option<SecondsSinceDayStart>>, // map a stop to its best time over all rounds
    best_transit_times: Vec<Option<SecondsSinceDayStart>>, // best time reached by transit only
    best_transit_legs: Vec<Option<TransitLeg>>,    // the leg achieving best_transit_times

    // rounds_arrivals[round][stop], kept across iterations
    rounds_arrivals: Vec<Vec<Option<StopArrival>>>,

    touched_previous_round: TouchedStops,
    touched_by_transit: TouchedStops,
    touched_by_transfer: TouchedStops,

    // pattern traversal scratch
    onboard: Option<OnboardTrip>,

    // per-iteration candidates, materialized by iteration_complete
    candidates: Vec<DestinationCandidate>,

    journeys: ParetoFront<response::Journey, JourneyCriteria>,

    exit_fallbacks: Vec<Option<PositiveDuration>>, // map a stop to its egress duration
}

impl MinArrivalState {
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
            best_times: vec![None; nb_of_stops],
            best_transit_times: vec![None; nb_of_stops],
            best_transit_legs: vec![None; nb_of_stops],
            rounds_arrivals: vec![vec![None; nb_of_stops]; max_nb_of_legs + 1],
            touched_previous_round: TouchedStops::new(nb_of_stops),
            touched_by_transit: TouchedStops::new(nb_of_stops),
            touched_by_transfer: TouchedStops::new(nb_of_stops),
            onboard: None,
            candidates: Vec::new(),
            journeys: ParetoFront::new(),
            exit_fallbacks,
        }
    }

    fn transit_stop_reached<'data, D, Cal>(
        &mut self,
        cal: &Cal,
        stop: &Stop,
        leg: TransitLeg,
    ) where
        D: Data + DataIters<'data>,
        Cal: TransitCalculator<'data, D>,
    {
        let alight_time = leg.alight_time;

        let improves_transit = match &self.best_transit_times[stop.idx()] {
            None => true,
            Some(best) => cal.is_better(&alight_time, best),
        };
        if improves_transit {
            self.best_transit_times[stop.idx()] = Some(alight_time);
            self.best_transit_legs[stop.idx()] = Some(leg);
            self.touched_by_transit.add(*stop);
            // the destination is one egress leg away from a transit arrival
            if let Some(exit_fallback) = self.exit_fallbacks[stop.idx()] {
                if let Some(dest_time) = cal.time_after_walk(&alight_time, &exit_fallback) {
                    self.candidates.push(DestinationCandidate {
                        round: self.round,
                        dest_time,
                        exit_fallback,
                        final_leg: leg,
                    });
                }
            }
        }

        let improves_best = match &self.best_times[stop.idx()] {
            None => true,
            Some(best) => cal.is_better(&alight_time, best),
        };
        if improves_best {
            self.best_times[stop.idx()] = Some(alight_time);
            self.rounds_arrivals[self.round][stop.idx()] = Some(StopArrival {
                time: alight_time,
                arrived_by: ArrivedBy::Transit(leg),
            });
        }
    }

    // Walk the back-pointers of a candidate down to its access leg.
    // Panics on a broken chain : that is a bug, not an input error.
    fn build_journey<'data, D, Cal>(
        &self,
        data: &'data D,
        cal: &Cal,
        candidate: &DestinationCandidate,
    ) -> Result<response::Journey, response::BadJourney>
    where
        D: Data + DataIters<'data>,
        Cal: TransitCalculator<'data, D>,
    {
        debug_assert!(candidate.round >= 1);
        let mut legs: Vec<TransitLeg> = vec![candidate.final_leg];
        let mut transfers: Vec<Option<Transfer>> = Vec::new();

        let mut current_round = candidate.round - 1;
        let mut current_stop = data.stop_at(
            &candidate.final_leg.trip.pattern,
            candidate.final_leg.board_position,
        );

        let (access_fallback, access_minute) = loop {
            let arrival = self.rounds_arrivals[current_round][current_stop.idx()]
                .as_ref()
                .unwrap_or_else(|| {
                    panic!(
                        "Broken back-pointer chain at stop {} round {}",
                        current_stop.idx(),
                        current_round
                    )
                });
            match arrival.arrived_by {
                ArrivedBy::Access { fallback, minute } => {
                    debug_assert!(current_round == 0);
                    break (fallback, minute);
                }
                ArrivedBy::Transit(leg) => {
                    transfers.push(None);
                    legs.push(leg);
                    current_stop = data.stop_at(&leg.trip.pattern, leg.board_position);
                    current_round -= 1;
                }
                ArrivedBy::Transfer { transfer, source } => {
                    transfers.push(Some(transfer));
                    legs.push(source);
                    current_stop = data.stop_at(&source.trip.pattern, source.board_position);
                    current_round -= 1;
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
                    candidate.exit_fallback,
                    data,
                )
            }
            crate::config::Direction::Backward => {
                // the chain walk of a backward search yields the legs
                // in chronological order already, with board and
                // debark sides swapped
                let first_vehicle = backward_vehicle_leg(&legs[0]);
                let connections = transfers
                    .into_iter()
                    .zip(legs.iter().skip(1).map(backward_vehicle_leg));
                response::Journey::new(
                    candidate.dest_time,
                    candidate.exit_fallback,
                    first_vehicle,
                    connections,
                    access_fallback,
                    data,
                )
            }
        }
    }
}

impl<'data, D, Cal> WorkerState<'data, D, Cal> for MinArrivalState
where
    D: Data + DataIters<'data>,
    Cal: TransitCalculator<'data, D>,
{
    fn setup_iteration(&mut self, _minute: &SecondsSinceDayStart) {
        self.round = 0;
        self.touched_previous_round.clear();
        self.touched_by_transit.clear();
        self.touched_by_transfer.clear();
        self.onboard = None;
        debug_assert!(self.candidates.is_empty());
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
        let improves_best = match &self.best_times[stop.idx()] {
            None => true,
            Some(best) => cal.is_better(&time, best),
        };
        if improves_best {
            self.best_times[stop.idx()] = Some(time);
            self.rounds_arrivals[0][stop.idx()] = Some(StopArrival {
                time,
                arrived_by: ArrivedBy::Access {
                    fallback: *fallback,
                    minute: *minute,
                },
            });
            self.touched_by_transfer.add(*stop);
        }
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
        self.onboard = None;
    }

    fn transit_at_position(
        &mut self,
        data: &'data D,
        cal: &Cal,
        trip_search: &mut Cal::TripSearch,
        pattern: &Pattern,
        position_idx: usize,
    ) {
        use super::trip_search::TripScheduleSearch;

        let stop = data.stop_at(pattern, position_idx);

        // alight the boarded trip at this position
        if let Some(onboard) = self.onboard {
            let alight_time = cal.trip_alight_time(&onboard.trip, position_idx);
            let leg = TransitLeg {
                trip: onboard.trip,
                board_position: onboard.board_position,
                board_time: onboard.board_time,
                alight_position: position_idx,
                alight_time,
            };
            self.transit_stop_reached::<D, Cal>(cal, &stop, leg);
        }

        // board or re-board from the previous round arrival
        if self.touched_previous_round.contains(&stop)
            && cal.can_board_at(position_idx, data.nb_of_positions(pattern))
        {
            let has_prev_time =
                self.rounds_arrivals[self.round - 1][stop.idx()].as_ref().map(|a| a.time);
            if let Some(prev_time) = has_prev_time {
                if let Some(earliest_board_time) = cal.board_time_with_slack(&prev_time) {
                    // re-boarding wins only for a strictly earlier trip
                    let bound = self.onboard.map(|onboard| onboard.trip.idx);
                    if let Some(found) =
                        trip_search.search(&earliest_board_time, position_idx, bound)
                    {
                        self.onboard = Some(OnboardTrip {
                            trip: found.trip,
                            board_position: position_idx,
                            board_time: found.trip_time,
                        });
                    }
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
        let has_source = self.best_transit_legs[from_stop.idx()];
        let source = match has_source {
            Some(source) => source,
            None => return,
        };
        let source_time = source.alight_time;
        for (to_stop, duration, transfer) in transfers {
            let has_time = cal.time_after_walk(&source_time, &duration);
            let time = match has_time {
                Some(time) => time,
                None => continue,
            };
            let improves_best = match &self.best_times[to_stop.idx()] {
                None => true,
                Some(best) => cal.is_better(&time, best),
            };
            if improves_best {
                self.best_times[to_stop.idx()] = Some(time);
                self.rounds_arrivals[self.round][to_stop.idx()] = Some(StopArrival {
                    time,
                    arrived_by: ArrivedBy::Transfer { transfer, source },
                });
                self.touched_by_transfer.add(to_stop);
            }
        }
    }

    fn transfers_for_round_complete(&mut self) {}

    fn iteration_complete(&mut self, data: &'data D, cal: &Cal) {
        // materialize the candidates now : the next iteration will
        // overwrite the round entries their chains go through
        let mut candidates = std::mem::take(&mut self.candidates);
        for candidate in &candidates {
            match self.build_journey(data, cal, candidate) {
                Ok(journey) => {
                    let criteria = journey_criteria(&journey);
                    self.journeys
                        .add(journey, criteria, is_lower_journey_criteria);
                }
                Err(err) => {
                    warn!("An invalid journey was dropped : {}", err);
                    debug_assert!(false, "extracted an invalid journey : {}", err);
                }
            }
        }
        // keep the allocation for the next iteration
        candidates.clear();
        self.candidates = candidates;
    }

    fn extract_paths(&mut self, _data: &'data D, _cal: &Cal) -> Vec<response::Journey> {
        let mut journeys: Vec<response::Journey> =
            self.journeys.iter().map(|(journey, _)| journey.clone()).collect();
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
