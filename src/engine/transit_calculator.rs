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

use crate::config::Direction;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::data_interface::{Data, DataIters};
use crate::transit_data::{Pattern, Trip};

use super::trip_search::{TripScheduleAlightSearch, TripScheduleBoardSearch, TripScheduleSearch};

const MINUTE: PositiveDuration = PositiveDuration::from_seconds(60);

/// What a journey costs : a point in time and a number of vehicle
/// legs. The meaning of "better" on the time component depends on the
/// search direction, so comparisons go through the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criteria {
    pub time: SecondsSinceDayStart,
    pub nb_of_legs: u8,
}

/// Direction-dependent arithmetic of the search.
///
/// Everything whose meaning depends on the direction lives here, so
/// that the worker body is direction-agnostic. The worker is generic
/// over the implementation : the choice is made once at construction
/// and no dynamic dispatch occurs in the per-stop loop.
pub trait TransitCalculator<'data, D>: Sized
where
    D: Data + DataIters<'data>,
{
    type Minutes: Iterator<Item = SecondsSinceDayStart>;
    type Positions: Iterator<Item = usize>;
    type TripSearch: TripScheduleSearch;

    /// The minutes of the search window, iterated in the order that
    /// makes state reuse across iterations valid : latest to earliest
    /// departure minute forward, earliest to latest arrival minute
    /// backward.
    fn range_raptor_minutes(&self) -> Self::Minutes;

    /// Positions of a pattern in travel order for this direction
    fn pattern_position_iterator(&self, nb_of_positions: usize) -> Self::Positions;

    fn create_trip_search(&self, pattern: Pattern) -> Self::TripSearch;

    /// `true` when `a` is a strictly better time than `b`
    fn is_better(&self, a: &SecondsSinceDayStart, b: &SecondsSinceDayStart) -> bool;

    /// `true` when trip `a_idx` is strictly better to be onboard of
    /// than trip `b_idx` of the same pattern
    fn is_earlier_trip(&self, a_idx: usize, b_idx: usize) -> bool;

    /// The bound handed to the trip search when trying to board from
    /// a stop reached at `time`
    fn board_time_with_slack(&self, time: &SecondsSinceDayStart) -> Option<SecondsSinceDayStart>;

    /// Time after walking for `duration` from a point reached at
    /// `time`. None when the walk exits the day window.
    fn time_after_walk(
        &self,
        time: &SecondsSinceDayStart,
        duration: &PositiveDuration,
    ) -> Option<SecondsSinceDayStart>;

    /// Time at which `trip` can be boarded at `position_idx`
    fn trip_board_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart;

    /// Time obtained when alighting `trip` at `position_idx`
    fn trip_alight_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart;

    /// `true` when boarding at this position can reach further positions
    fn can_board_at(&self, position_idx: usize, nb_of_positions: usize) -> bool;

    /// `true` when `a` is better than or equivalent to `b`
    fn is_lower_criteria(&self, a: &Criteria, b: &Criteria) -> bool;

    /// Transfers leaving a stop, in the travel direction
    fn transfers_at(&self, from_stop: &crate::transit_data::Stop) -> <D as DataIters<'data>>::TransfersAtStop;

    fn direction(&self) -> Direction;
}

/// Forward search : minimize the arrival time, given a window of
/// departure minutes.
pub struct DepartAfter<'data, D> {
    data: &'data D,
    from_minute: SecondsSinceDayStart,
    to_minute: SecondsSinceDayStart,
    board_slack: PositiveDuration,
    binary_search_threshold: usize,
}

impl<'data, D: Data> DepartAfter<'data, D> {
    pub fn new(
        data: &'data D,
        from_minute: SecondsSinceDayStart,
        to_minute: SecondsSinceDayStart,
        board_slack: PositiveDuration,
        binary_search_threshold: usize,
    ) -> Self {
        debug_assert!(from_minute <= to_minute);
        Self {
            data,
            from_minute,
            to_minute,
            board_slack,
            binary_search_threshold,
        }
    }
}

impl<'data, D> TransitCalculator<'data, D> for DepartAfter<'data, D>
where
    D: Data + DataIters<'data>,
{
    type Minutes = MinutesDescending;
    type Positions = std::ops::Range<usize>;
    type TripSearch = TripScheduleBoardSearch<'data, D>;

    fn range_raptor_minutes(&self) -> Self::Minutes {
        MinutesDescending {
            current: Some(self.to_minute),
            first: self.from_minute,
        }
    }

    fn pattern_position_iterator(&self, nb_of_positions: usize) -> Self::Positions {
        0..nb_of_positions
    }

    fn create_trip_search(&self, pattern: Pattern) -> Self::TripSearch {
        TripScheduleBoardSearch::new(self.data, pattern, self.binary_search_threshold)
    }

    fn is_better(&self, a: &SecondsSinceDayStart, b: &SecondsSinceDayStart) -> bool {
        a < b
    }

    fn is_earlier_trip(&self, a_idx: usize, b_idx: usize) -> bool {
        a_idx < b_idx
    }

    fn board_time_with_slack(&self, time: &SecondsSinceDayStart) -> Option<SecondsSinceDayStart> {
        time.checked_add(self.board_slack)
    }

    fn time_after_walk(
        &self,
        time: &SecondsSinceDayStart,
        duration: &PositiveDuration,
    ) -> Option<SecondsSinceDayStart> {
        time.checked_add(*duration)
    }

    fn trip_board_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.data.board_time_of(trip, position_idx)
    }

    fn trip_alight_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.data.debark_time_of(trip, position_idx)
    }

    fn can_board_at(&self, position_idx: usize, nb_of_positions: usize) -> bool {
        position_idx + 1 < nb_of_positions
    }

    fn is_lower_criteria(&self, a: &Criteria, b: &Criteria) -> bool {
        a.time <= b.time && a.nb_of_legs <= b.nb_of_legs
    }

    fn transfers_at(&self, from_stop: &crate::transit_data::Stop) -> <D as DataIters<'data>>::TransfersAtStop {
        let data: &'data D = self.data;
        data.outgoing_transfers_at(from_stop)
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }
}

/// Backward search : maximize the departure time, given a window of
/// arrival minutes. The pattern traversal and the time axis are both
/// reversed, the worker body stays unchanged.
pub struct ArriveBefore<'data, D> {
    data: &'data D,
    from_minute: SecondsSinceDayStart,
    to_minute: SecondsSinceDayStart,
    alight_slack: PositiveDuration,
    binary_search_threshold: usize,
}

impl<'data, D: Data> ArriveBefore<'data, D> {
    pub fn new(
        data: &'data D,
        from_minute: SecondsSinceDayStart,
        to_minute: SecondsSinceDayStart,
        alight_slack: PositiveDuration,
        binary_search_threshold: usize,
    ) -> Self {
        debug_assert!(from_minute <= to_minute);
        Self {
            data,
            from_minute,
            to_minute,
            alight_slack,
            binary_search_threshold,
        }
    }
}

impl<'data, D> TransitCalculator<'data, D> for ArriveBefore<'data, D>
where
    D: Data + DataIters<'data>,
{
    type Minutes = MinutesAscending;
    type Positions = std::iter::Rev<std::ops::Range<usize>>;
    type TripSearch = TripScheduleAlightSearch<'data, D>;

    fn range_raptor_minutes(&self) -> Self::Minutes {
        MinutesAscending {
            current: Some(self.from_minute),
            last: self.to_minute,
        }
    }

    fn pattern_position_iterator(&self, nb_of_positions: usize) -> Self::Positions {
        (0..nb_of_positions).rev()
    }

    fn create_trip_search(&self, pattern: Pattern) -> Self::TripSearch {
        TripScheduleAlightSearch::new(self.data, pattern, self.binary_search_threshold)
    }

    fn is_better(&self, a: &SecondsSinceDayStart, b: &SecondsSinceDayStart) -> bool {
        a > b
    }

    fn is_earlier_trip(&self, a_idx: usize, b_idx: usize) -> bool {
        a_idx > b_idx
    }

    fn board_time_with_slack(&self, time: &SecondsSinceDayStart) -> Option<SecondsSinceDayStart> {
        time.checked_sub(self.alight_slack)
    }

    fn time_after_walk(
        &self,
        time: &SecondsSinceDayStart,
        duration: &PositiveDuration,
    ) -> Option<SecondsSinceDayStart> {
        time.checked_sub(*duration)
    }

    fn trip_board_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.data.debark_time_of(trip, position_idx)
    }

    fn trip_alight_time(&self, trip: &Trip, position_idx: usize) -> SecondsSinceDayStart {
        self.data.board_time_of(trip, position_idx)
    }

    fn can_board_at(&self, position_idx: usize, _nb_of_positions: usize) -> bool {
        position_idx > 0
    }

    fn is_lower_criteria(&self, a: &Criteria, b: &Criteria) -> bool {
        a.time >= b.time && a.nb_of_legs <= b.nb_of_legs
    }

    fn transfers_at(&self, from_stop: &crate::transit_data::Stop) -> <D as DataIters<'data>>::TransfersAtStop {
        let data: &'data D = self.data;
        data.incoming_transfers_at(from_stop)
    }

    fn direction(&self) -> Direction {
        Direction::Backward
    }
}

/// Departure minutes from latest to earliest, one minute apart
pub struct MinutesDescending {
    current: Option<SecondsSinceDayStart>,
    first: SecondsSinceDayStart,
}

impl Iterator for MinutesDescending {
    type Item = SecondsSinceDayStart;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current
            .checked_sub(MINUTE)
            .filter(|minute| *minute >= self.first);
        Some(current)
    }
}

/// Arrival minutes from earliest to latest, one minute apart
pub struct MinutesAscending {
    current: Option<SecondsSinceDayStart>,
    last: SecondsSinceDayStart,
}

impl Iterator for MinutesAscending {
    type Item = SecondsSinceDayStart;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current
            .checked_add(MINUTE)
            .filter(|minute| *minute <= self.last);
        Some(current)
    }
}
