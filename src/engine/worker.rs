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

use std::marker::PhantomData;

use tracing::debug;

use crate::config::RequestParams;
use crate::response;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::data_interface::DataWithIters;
use crate::transit_data::Stop;

use super::timers::WorkerTimers;
use super::transit_calculator::TransitCalculator;
use super::worker_state::WorkerState;

/// Everything one search needs : the provider handle, the access and
/// egress legs in search order, and the tuning parameters. The worker
/// holds one context for its lifetime.
pub struct SearchContext<'data, D> {
    pub data: &'data D,
    /// access legs forward, egress legs backward
    pub entry_stop_and_fallback_duration: Vec<(Stop, PositiveDuration)>,
    /// egress legs forward, access legs backward
    pub exit_stop_and_fallback_duration: Vec<(Stop, PositiveDuration)>,
    pub params: RequestParams,
}

/// The Range-RAPTOR search loop.
///
/// The outer loop iterates the minutes of the search window in the
/// order given by the calculator, reusing the state accumulated by
/// previous iterations. Each iteration runs rounds of a transit phase
/// and a transfer phase until no stop is improved, or the round
/// counter reaches max_nb_of_transfers + 1.
pub struct RangeRaptorWorker<'data, D, Cal, State, Timers>
where
    D: DataWithIters,
    Cal: TransitCalculator<'data, D>,
    State: WorkerState<'data, D, Cal>,
    Timers: WorkerTimers,
{
    context: SearchContext<'data, D>,
    calculator: Cal,
    state: State,
    timers: Timers,
    touched_scratch: Vec<Stop>,
    phantom: PhantomData<&'data D>,
}

impl<'data, D, Cal, State, Timers> RangeRaptorWorker<'data, D, Cal, State, Timers>
where
    D: DataWithIters,
    Cal: TransitCalculator<'data, D>,
    State: WorkerState<'data, D, Cal>,
    Timers: WorkerTimers,
{
    pub fn new(context: SearchContext<'data, D>, calculator: Cal, state: State, timers: Timers) -> Self {
        Self {
            context,
            calculator,
            state,
            timers,
            touched_scratch: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Run the whole search and extract the Pareto set of journeys
    pub fn route(&mut self) -> Vec<response::Journey> {
        self.timers.route_started();
        let minutes = self.calculator.range_raptor_minutes();
        for minute in minutes {
            self.run_raptor_for_minute(&minute);
        }
        self.timers.route_finished();
        self.state.extract_paths(self.context.data, &self.calculator)
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    fn run_raptor_for_minute(&mut self, minute: &SecondsSinceDayStart) {
        self.state.setup_iteration(minute);
        for (stop, fallback) in &self.context.entry_stop_and_fallback_duration {
            self.state
                .set_initial_time_for_iteration(&self.calculator, stop, fallback, minute);
        }

        while self.state.is_new_round_available() {
            self.state.prepare_for_next_round();

            self.timers.transit_round_started();
            self.run_transit_round();
            self.timers.transit_round_finished();

            self.timers.transfer_round_started();
            self.run_transfer_round();
            self.timers.transfer_round_finished();
        }

        // the next iteration overwrites the per-round state, so the
        // state makes protective copies of whatever extraction needs
        self.state.iteration_complete(self.context.data, &self.calculator);
        debug!(
            "minute {} computed with {} rounds",
            minute,
            self.state.round()
        );
    }

    fn run_transit_round(&mut self) {
        self.touched_scratch.clear();
        self.touched_scratch
            .extend_from_slice(self.state.stops_touched_previous_round());

        let patterns = self.context.data.patterns_visiting(&self.touched_scratch);
        for pattern in patterns {
            let mut trip_search = self.calculator.create_trip_search(pattern);
            self.state.prepare_pattern(&pattern);
            let nb_of_positions = self.context.data.nb_of_positions(&pattern);
            for position_idx in self.calculator.pattern_position_iterator(nb_of_positions) {
                self.state.transit_at_position(
                    self.context.data,
                    &self.calculator,
                    &mut trip_search,
                    &pattern,
                    position_idx,
                );
            }
        }
        self.state.transits_for_round_complete();
    }

    fn run_transfer_round(&mut self) {
        // loop transfers need no handling here : their stop is
        // already reached, and a relaxation back to it cannot improve
        self.touched_scratch.clear();
        self.touched_scratch
            .extend_from_slice(self.state.stops_touched_by_transit());

        for idx in 0..self.touched_scratch.len() {
            let from_stop = self.touched_scratch[idx];
            let transfers = self.calculator.transfers_at(&from_stop);
            self.state
                .transfer_to_stops(&self.calculator, &from_stop, transfers);
        }
        self.state.transfers_for_round_complete();
    }
}
