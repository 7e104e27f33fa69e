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

use super::{Pattern, Position, Stop, Transfer, Trip};
use crate::time::{PositiveDuration, SecondsSinceDayStart};

/// Read-only access to the timetable, as seen by one search.
///
/// Implementations may panic on handles that do not belong to their
/// data : those are programmer errors, not recoverable ones.
pub trait Data {
    /// One-shot, called before the search loop is entered.
    /// Allows the implementation to precompute its service masks.
    fn init(&mut self);

    /// An upper bound on the total number of `Stop`s
    fn nb_of_stops(&self) -> usize;

    /// An upper bound on the total number of `Pattern`s
    fn nb_of_patterns(&self) -> usize;

    fn nb_of_positions(&self, pattern: &Pattern) -> usize;

    /// The `Stop` at `position_idx` in `pattern`.
    ///
    /// Panics if `position_idx` is out of `pattern`.
    fn stop_at(&self, pattern: &Pattern, position_idx: usize) -> Stop;

    fn nb_of_trips_of(&self, pattern: &Pattern) -> usize;

    /// Time at which a traveler waiting at `position_idx` can board `trip`.
    ///
    /// For a fixed `position_idx`, this is non-decreasing in `trip.idx`.
    fn board_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart;

    /// Time at which a traveler inside `trip` debarks at `position_idx`.
    ///
    /// For a fixed `position_idx`, this is non-decreasing in `trip.idx`.
    fn debark_time_of(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart;

    /// Returns `true` if `trip` runs on the day of the search
    fn is_trip_in_service(&self, trip: &Trip) -> bool;

    /// End stop and duration of `transfer`
    fn transfer(&self, transfer: &Transfer) -> (Stop, PositiveDuration);

    fn transfer_start_stop(&self, transfer: &Transfer) -> Stop;

    /// Returns `true` if `upstream` is positioned strictly before
    /// `downstream` in their common pattern.
    ///
    /// Panics if the two positions do not belong to the same pattern.
    fn is_upstream(&self, upstream: &Position, downstream: &Position) -> bool;
}

/// Iterators over the timetable. All iterators are single-pass and
/// valid only until the next call on the provider.
pub trait DataIters<'a> {
    /// Iterator over every pattern visiting at least one stop of a
    /// given set, without duplicates. Order is unspecified but stable
    /// for a given input.
    type PatternsVisiting: Iterator<Item = Pattern> + 'a;
    fn patterns_visiting(&'a self, stops: &'a [Stop]) -> Self::PatternsVisiting;

    /// Iterator over transfers at a stop. Yields the stop at the other
    /// end of the transfer, the duration, and the transfer handle.
    type TransfersAtStop: Iterator<Item = (Stop, PositiveDuration, Transfer)> + 'a;

    /// Transfers that can be taken at `from_stop`
    fn outgoing_transfers_at(&'a self, from_stop: &Stop) -> Self::TransfersAtStop;

    /// Transfers that end at `to_stop`, walked backward by the reverse search
    fn incoming_transfers_at(&'a self, to_stop: &Stop) -> Self::TransfersAtStop;
}

pub trait DataWithIters: Data + for<'a> DataIters<'a> {}

impl<T: Data + for<'a> DataIters<'a>> DataWithIters for T {}
