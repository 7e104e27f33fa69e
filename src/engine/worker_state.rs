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

use crate::response;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::data_interface::{Data, DataIters};
use crate::transit_data::{Pattern, Position, Stop, Trip};

use super::transit_calculator::TransitCalculator;

/// One vehicle leg, in search order : `board_position` is where the
/// search boarded, which is the chronological debark side when the
/// search runs backward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransitLeg {
    pub(crate) trip: Trip,
    pub(crate) board_position: usize,
    pub(crate) board_time: SecondsSinceDayStart,
    pub(crate) alight_position: usize,
    pub(crate) alight_time: SecondsSinceDayStart,
}

pub(crate) fn forward_vehicle_leg(leg: &TransitLeg) -> response::VehicleLeg {
    response::VehicleLeg {
        trip: leg.trip,
        board_position: Position::new(leg.trip.pattern, leg.board_position),
        debark_position: Position::new(leg.trip.pattern, leg.alight_position),
    }
}

pub(crate) fn backward_vehicle_leg(leg: &TransitLeg) -> response::VehicleLeg {
    response::VehicleLeg {
        trip: leg.trip,
        board_position: Position::new(leg.trip.pattern, leg.alight_position),
        debark_position: Position::new(leg.trip.pattern, leg.board_position),
    }
}

/// What a complete journey costs. Journeys are chronologically
/// oriented when this is computed, so the comparison is the same for
/// both search directions : leave as late as possible, arrive as
/// early as possible, with as few transfers as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyCriteria {
    pub departure: SecondsSinceDayStart,
    pub arrival: SecondsSinceDayStart,
    pub nb_of_transfers: usize,
}

pub fn journey_criteria(journey: &response::Journey) -> JourneyCriteria {
    JourneyCriteria {
        departure: journey.departure_datetime,
        arrival: journey.arrival_datetime(),
        nb_of_transfers: journey.nb_of_transfers(),
    }
}

/// `true` when `a` is better than or equivalent to `b`. Two journeys
/// with identical criteria coalesce into one.
pub fn is_lower_journey_criteria(a: &JourneyCriteria, b: &JourneyCriteria) -> bool {
    a.departure >= b.departure && a.arrival <= b.arrival && a.nb_of_transfers <= b.nb_of_transfers
}

/// Keeps track of the search state : per round best arrivals per
/// stop, back-pointers, touched-stop sets, and the lifecycle of one
/// iteration of the minute loop.
///
/// The worker delegates all state bookkeeping to this trait so that
/// the algorithm body stays the same for the single-criterion and the
/// multi-criterion variants. The two variants are different
/// implementations of this one trait.
///
/// `transit_at_position` is the inner kernel : it fuses the "attempt
/// to alight here with the boarded trip(s)" and "attempt to (re)board
/// here from the previous round" primitives. The multi-criterion
/// implementation keeps a front of boarded trips where the
/// single-criterion one keeps exactly one.
pub trait WorkerState<'data, D, Cal>
where
    D: Data + DataIters<'data>,
    Cal: TransitCalculator<'data, D>,
{
    /// Begin a new iteration of the minute loop. State carried from
    /// previous iterations is kept : this is what Range-RAPTOR reuse
    /// is about. Per-iteration scratch is reset.
    fn setup_iteration(&mut self, minute: &SecondsSinceDayStart);

    /// Seed round 0 with one access leg
    fn set_initial_time_for_iteration(
        &mut self,
        cal: &Cal,
        stop: &Stop,
        fallback: &PositiveDuration,
        minute: &SecondsSinceDayStart,
    );

    /// `true` while the previous round touched stops and the round
    /// counter has not reached max_nb_of_transfers + 1
    fn is_new_round_available(&self) -> bool;

    /// Advance the round counter and rotate the touched-stop sets
    fn prepare_for_next_round(&mut self);

    fn round(&self) -> usize;

    /// Stops improved during the previous round, by transit or by
    /// transfer. Drives the pattern iterator.
    fn stops_touched_previous_round(&self) -> &[Stop];

    /// Stops improved by transit during the current round. Drives the
    /// transfer relaxation.
    fn stops_touched_by_transit(&self) -> &[Stop];

    /// Reset the traversal scratch before scanning `pattern`
    fn prepare_pattern(&mut self, pattern: &Pattern);

    /// Visit one position of the pattern being scanned : alight the
    /// boarded trip(s) here if that improves the stop, then try to
    /// (re)board from the previous round arrival at this stop.
    fn transit_at_position(
        &mut self,
        data: &'data D,
        cal: &Cal,
        trip_search: &mut Cal::TripSearch,
        pattern: &Pattern,
        position_idx: usize,
    );

    fn transits_for_round_complete(&mut self);

    /// Relax every transfer leaving `from_stop`, whose best arrival
    /// by transit was improved this round. Transfers do not compound :
    /// the relaxation reads transit arrivals only.
    fn transfer_to_stops(
        &mut self,
        cal: &Cal,
        from_stop: &Stop,
        transfers: <D as DataIters<'data>>::TransfersAtStop,
    );

    fn transfers_for_round_complete(&mut self);

    /// End of one iteration of the minute loop. Anything the next
    /// iteration may overwrite but which path extraction needs must
    /// be copied out here.
    fn iteration_complete(&mut self, data: &'data D, cal: &Cal);

    /// The Pareto set of journeys accumulated over all iterations
    fn extract_paths(&mut self, data: &'data D, cal: &Cal) -> Vec<response::Journey>;
}
