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

use std::time::SystemTime;

use tracing::{debug, trace};

use crate::config::{CriteriaType, Direction, RequestParams};
use crate::engine::timers::NoopTimers;
use crate::engine::{
    ArriveBefore, DepartAfter, MinArrivalState, ParetoState, RangeRaptorWorker, SearchContext,
    TransitCalculator, WorkerState,
};
use crate::request::{BadRequest, RequestInput};
use crate::response;
use crate::transit_data::data_interface::{Data, DataWithIters};
use crate::transit_data::filtered::TransitDataFiltered;
use crate::transit_data::TransitData;

/// Entry point of the engine : validates a request, builds the
/// per-search view of the data, and runs the worker variant selected
/// by the request's direction and criteria.
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    pub fn solve_request(
        &mut self,
        transit_data: &TransitData,
        request: &RequestInput,
        params: &RequestParams,
    ) -> Result<Vec<response::Journey>, BadRequest> {
        let day = request.validate(transit_data)?;

        let mut data = TransitDataFiltered::new(transit_data, day);
        data.init();

        // backward, the search starts from the arrival side
        let (entry_legs, exit_legs) = match request.direction {
            Direction::Forward => (
                request.departures_stop_and_fallback_duration.clone(),
                request.arrivals_stop_and_fallback_duration.clone(),
            ),
            Direction::Backward => (
                request.arrivals_stop_and_fallback_duration.clone(),
                request.departures_stop_and_fallback_duration.clone(),
            ),
        };

        let nb_of_stops = data.nb_of_stops();
        let context = SearchContext {
            data: &data,
            entry_stop_and_fallback_duration: entry_legs,
            exit_stop_and_fallback_duration: exit_legs,
            params: params.clone(),
        };

        let journeys = match (request.direction, request.criteria) {
            (Direction::Forward, CriteriaType::MinArrival) => {
                let calculator = DepartAfter::new(
                    &data,
                    request.earliest_datetime,
                    request.latest_datetime,
                    params.board_slack,
                    params.binary_search_threshold,
                );
                let state = MinArrivalState::new(
                    nb_of_stops,
                    params.max_nb_of_transfers,
                    &context.exit_stop_and_fallback_duration,
                );
                solve_inner(transit_data, context, calculator, state)
            }
            (Direction::Forward, CriteriaType::Pareto) => {
                let calculator = DepartAfter::new(
                    &data,
                    request.earliest_datetime,
                    request.latest_datetime,
                    params.board_slack,
                    params.binary_search_threshold,
                );
                let state = ParetoState::new(
                    nb_of_stops,
                    params.max_nb_of_transfers,
                    &context.exit_stop_and_fallback_duration,
                );
                solve_inner(transit_data, context, calculator, state)
            }
            (Direction::Backward, CriteriaType::MinArrival) => {
                let calculator = ArriveBefore::new(
                    &data,
                    request.earliest_datetime,
                    request.latest_datetime,
                    params.alight_slack,
                    params.binary_search_threshold,
                );
                let state = MinArrivalState::new(
                    nb_of_stops,
                    params.max_nb_of_transfers,
                    &context.exit_stop_and_fallback_duration,
                );
                solve_inner(transit_data, context, calculator, state)
            }
            (Direction::Backward, CriteriaType::Pareto) => {
                let calculator = ArriveBefore::new(
                    &data,
                    request.earliest_datetime,
                    request.latest_datetime,
                    params.alight_slack,
                    params.binary_search_threshold,
                );
                let state = ParetoState::new(
                    nb_of_stops,
                    params.max_nb_of_transfers,
                    &context.exit_stop_and_fallback_duration,
                );
                solve_inner(transit_data, context, calculator, state)
            }
        };

        Ok(journeys)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

fn solve_inner<'data, D, Cal, State>(
    transit_data: &TransitData,
    context: SearchContext<'data, D>,
    calculator: Cal,
    state: State,
) -> Vec<response::Journey>
where
    D: DataWithIters,
    Cal: TransitCalculator<'data, D>,
    State: WorkerState<'data, D, Cal>,
{
    debug!("Start computing journeys");
    let request_timer = SystemTime::now();

    let mut worker = RangeRaptorWorker::new(context, calculator, state, NoopTimers);
    let journeys = worker.route();

    if let Ok(duration) = request_timer.elapsed() {
        debug!(
            "Journeys computed in {} ms, {} journeys found",
            duration.as_millis(),
            journeys.len()
        );
    }
    for journey in &journeys {
        if let Ok(string) = journey.print(transit_data) {
            trace!("{}", string);
        }
    }

    journeys
}
