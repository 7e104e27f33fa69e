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

use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::{Transfer, Trip};

type Id = usize;

const MAX_ID: Id = usize::MAX;

#[derive(Clone, Copy, Debug)]
pub struct Onboard {
    id: Id,
}

#[derive(Clone, Copy, Debug)]
pub struct Debarked {
    id: Id,
}

#[derive(Clone, Copy, Debug)]
pub struct Waiting {
    id: Id,
}

/// A complete journey is a sequence of moments of the form
///  Waiting, Onboard, Debarked, (Waiting, Onboard, Debarked)*
///
/// We associate the minimum amount of data to each moment so as to be
/// able to reconstruct the whole journey :
///  - Onboard   -> a Trip and the position at which it was boarded.
///      The Waiting before the Onboard tells how we came to board.
///  - Debarked  -> the position where we alight. The Trip alighted
///      is given by the Onboard moment before this Debarked.
///  - Waiting   -> either the start of the journey (a Departure with
///      its street fallback), a foot Transfer from a Debarked, or a
///      stay at the same stop after a Debarked.
pub struct JourneysTree {
    // data associated to each moment
    onboards: Vec<(Trip, usize, Waiting)>,
    debarkeds: Vec<(usize, Onboard)>,
    waitings: Vec<WaitingData>,
}

pub enum WaitingData {
    Departure {
        fallback: PositiveDuration,
        minute: SecondsSinceDayStart,
    },
    Transfer(Transfer, Debarked),
    SameStop(Debarked),
}

impl JourneysTree {
    pub fn new() -> Self {
        Self {
            onboards: Vec::new(),
            debarkeds: Vec::new(),
            waitings: Vec::new(),
        }
    }

    pub fn depart(&mut self, fallback: PositiveDuration, minute: SecondsSinceDayStart) -> Waiting {
        debug_assert!(self.waitings.len() < MAX_ID);
        let id = self.waitings.len();
        self.waitings.push(WaitingData::Departure { fallback, minute });

        Waiting { id }
    }

    pub fn board(&mut self, waiting: &Waiting, trip: &Trip, board_position: usize) -> Onboard {
        debug_assert!(self.onboards.len() < MAX_ID);
        let id = self.onboards.len();
        self.onboards.push((*trip, board_position, *waiting));

        Onboard { id }
    }

    pub fn debark(&mut self, onboard: &Onboard, debark_position: usize) -> Debarked {
        debug_assert!(self.debarkeds.len() < MAX_ID);
        let id = self.debarkeds.len();
        self.debarkeds.push((debark_position, *onboard));

        Debarked { id }
    }

    pub fn transfer(&mut self, debarked: &Debarked, transfer: &Transfer) -> Waiting {
        debug_assert!(self.waitings.len() < MAX_ID);
        let id = self.waitings.len();
        self.waitings.push(WaitingData::Transfer(*transfer, *debarked));

        Waiting { id }
    }

    pub fn stay(&mut self, debarked: &Debarked) -> Waiting {
        debug_assert!(self.waitings.len() < MAX_ID);
        let id = self.waitings.len();
        self.waitings.push(WaitingData::SameStop(*debarked));

        Waiting { id }
    }

    pub fn onboard(&self, onboard: &Onboard) -> &(Trip, usize, Waiting) {
        &self.onboards[onboard.id]
    }

    pub fn debarked(&self, debarked: &Debarked) -> &(usize, Onboard) {
        &self.debarkeds[debarked.id]
    }

    pub fn waiting(&self, waiting: &Waiting) -> &WaitingData {
        &self.waitings[waiting.id]
    }

    pub fn size(&self) -> usize {
        self.onboards.len() + self.debarkeds.len() + self.waitings.len()
    }

    pub fn clear(&mut self) {
        self.onboards.clear();
        self.debarkeds.clear();
        self.waitings.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.onboards.is_empty() && self.debarkeds.is_empty() && self.waitings.is_empty()
    }
}

impl Default for JourneysTree {
    fn default() -> Self {
        Self::new()
    }
}
