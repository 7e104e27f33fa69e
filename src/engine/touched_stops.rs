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

use crate::transit_data::Stop;

/// The set of stops whose best arrival was improved, stored as a flag
/// per stop paired with the list of flagged stops. Clearing walks the
/// list instead of the whole flag vector.
#[derive(Debug)]
pub struct TouchedStops {
    touched_flags: Vec<bool>, // map a stop to a bool
    touched_stops: Vec<Stop>, // list of touched stops
}

impl TouchedStops {
    pub fn new(nb_of_stops: usize) -> Self {
        Self {
            touched_flags: vec![false; nb_of_stops],
            touched_stops: Vec::new(),
        }
    }

    pub fn add(&mut self, stop: Stop) {
        if !self.touched_flags[stop.idx()] {
            self.touched_flags[stop.idx()] = true;
            self.touched_stops.push(stop);
        }
    }

    pub fn contains(&self, stop: &Stop) -> bool {
        self.touched_flags[stop.idx()]
    }

    pub fn is_empty(&self) -> bool {
        self.touched_stops.is_empty()
    }

    pub fn as_slice(&self) -> &[Stop] {
        &self.touched_stops
    }

    pub fn clear(&mut self) {
        for stop in self.touched_stops.drain(..) {
            self.touched_flags[stop.idx()] = false;
        }
    }
}
