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

use super::{Pattern, Stop, StopData, Transfer, TransitData};
use crate::time::PositiveDuration;

use std::iter::Enumerate;
use std::slice::Iter as SliceIter;

static NO_PATTERNS: [Pattern; 0] = [];

impl TransitData {
    pub fn patterns_visiting<'a>(&'a self, stops: &'a [Stop]) -> PatternsVisiting<'a> {
        PatternsVisiting {
            stops_data: &self.stops_data,
            stops: stops.iter(),
            current: NO_PATTERNS.iter(),
            seen: vec![false; self.patterns_data.len()],
        }
    }

    pub fn outgoing_transfers_at(&self, from_stop: &Stop) -> TransfersAtStop<'_> {
        let stop_data = self.stop_data(from_stop);
        TransfersAtStop {
            inner: TransfersAtStopInner::Outgoing {
                from_stop: *from_stop,
                iter: stop_data.outgoing_transfers.iter().enumerate(),
            },
        }
    }

    pub fn incoming_transfers_at(&self, to_stop: &Stop) -> TransfersAtStop<'_> {
        let stop_data = self.stop_data(to_stop);
        TransfersAtStop {
            inner: TransfersAtStopInner::Incoming {
                iter: stop_data.incoming_transfers.iter(),
            },
        }
    }
}

/// Yields every pattern visiting at least one of the given stops,
/// without duplicates.
pub struct PatternsVisiting<'a> {
    stops_data: &'a [StopData],
    stops: SliceIter<'a, Stop>,
    current: SliceIter<'a, Pattern>,
    seen: Vec<bool>,
}

impl<'a> Iterator for PatternsVisiting<'a> {
    type Item = Pattern;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for pattern in self.current.by_ref() {
                if !self.seen[pattern.idx] {
                    self.seen[pattern.idx] = true;
                    return Some(*pattern);
                }
            }
            let stop = self.stops.next()?;
            self.current = self.stops_data[stop.idx].patterns.iter();
        }
    }
}

pub struct TransfersAtStop<'a> {
    inner: TransfersAtStopInner<'a>,
}

enum TransfersAtStopInner<'a> {
    Outgoing {
        from_stop: Stop,
        iter: Enumerate<SliceIter<'a, (Stop, PositiveDuration)>>,
    },
    Incoming {
        iter: SliceIter<'a, (Stop, PositiveDuration, usize)>,
    },
}

impl<'a> Iterator for TransfersAtStop<'a> {
    // the stop at the other end of the transfer, its duration,
    // and the canonical (outgoing) transfer handle
    type Item = (Stop, PositiveDuration, Transfer);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            TransfersAtStopInner::Outgoing { from_stop, iter } => {
                iter.next().map(|(idx, (to_stop, duration))| {
                    let transfer = Transfer {
                        stop: *from_stop,
                        idx_in_stop_transfers: idx,
                    };
                    (*to_stop, *duration, transfer)
                })
            }
            TransfersAtStopInner::Incoming { iter } => {
                iter.next().map(|(from_stop, duration, idx)| {
                    let transfer = Transfer {
                        stop: *from_stop,
                        idx_in_stop_transfers: *idx,
                    };
                    (*from_stop, *duration, transfer)
                })
            }
        }
    }
}
