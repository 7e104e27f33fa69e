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

use std::time::{Duration, SystemTime};

use tracing::warn;

/// Hooks around the phases of the search. The default implementations
/// do nothing, so a no-op timer compiles away entirely.
pub trait WorkerTimers {
    fn route_started(&mut self) {}
    fn route_finished(&mut self) {}
    fn transit_round_started(&mut self) {}
    fn transit_round_finished(&mut self) {}
    fn transfer_round_started(&mut self) {}
    fn transfer_round_finished(&mut self) {}
}

pub struct NoopTimers;

impl WorkerTimers for NoopTimers {}

/// Accumulates the wall-clock time spent in each phase
#[derive(Debug, Default)]
pub struct PerformanceTimers {
    route_start: Option<SystemTime>,
    transit_start: Option<SystemTime>,
    transfer_start: Option<SystemTime>,
    pub route_duration: Duration,
    pub transit_duration: Duration,
    pub transfer_duration: Duration,
    pub nb_of_transit_rounds: u64,
}

impl PerformanceTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> String {
        format!(
            "route {} ms, of which transit {} ms over {} rounds, transfers {} ms",
            self.route_duration.as_millis(),
            self.transit_duration.as_millis(),
            self.nb_of_transit_rounds,
            self.transfer_duration.as_millis(),
        )
    }
}

fn elapsed_since(start: Option<SystemTime>) -> Duration {
    let start = match start {
        Some(start) => start,
        None => return Duration::ZERO,
    };
    match start.elapsed() {
        Ok(duration) => duration,
        Err(err) => {
            warn!("Timer error : {}", err);
            Duration::ZERO
        }
    }
}

impl WorkerTimers for PerformanceTimers {
    fn route_started(&mut self) {
        self.route_start = Some(SystemTime::now());
    }

    fn route_finished(&mut self) {
        self.route_duration += elapsed_since(self.route_start.take());
    }

    fn transit_round_started(&mut self) {
        self.transit_start = Some(SystemTime::now());
    }

    fn transit_round_finished(&mut self) {
        self.transit_duration += elapsed_since(self.transit_start.take());
        self.nb_of_transit_rounds += 1;
    }

    fn transfer_round_started(&mut self) {
        self.transfer_start = Some(SystemTime::now());
    }

    fn transfer_round_finished(&mut self) {
        self.transfer_duration += elapsed_since(self.transfer_start.take());
    }
}
