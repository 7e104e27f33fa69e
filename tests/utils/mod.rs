// Copyright (C) 2017 Kisio Digital and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>
#![allow(dead_code)]

use anyhow::{anyhow, Error};

use rapido::chrono::NaiveDate;
use rapido::{
    BadRequest, CriteriaType, Direction, PositiveDuration, RequestInput, RequestParams,
    SecondsSinceDayStart, Solver, TransitData,
};

pub fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn time(string: &str) -> SecondsSinceDayStart {
    SecondsSinceDayStart::from_hms_str(string)
        .unwrap_or_else(|| panic!("invalid time {}", string))
}

pub fn duration(seconds: u32) -> PositiveDuration {
    PositiveDuration::from_seconds(seconds)
}

pub fn default_date() -> NaiveDate {
    "2020-01-01".parse().unwrap()
}

pub struct Config {
    pub direction: Direction,
    pub criteria: CriteriaType,
    pub params: RequestParams,
    pub date: NaiveDate,
    pub departure_fallback: PositiveDuration,
    pub arrival_fallback: PositiveDuration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            criteria: CriteriaType::Pareto,
            params: RequestParams::default(),
            date: default_date(),
            departure_fallback: PositiveDuration::zero(),
            arrival_fallback: PositiveDuration::zero(),
        }
    }
}

pub fn make_request(
    transit_data: &TransitData,
    from: &str,
    to: &str,
    earliest: &str,
    latest: &str,
    config: &Config,
) -> Result<RequestInput, Error> {
    let from_stop = transit_data
        .stop_by_name(from)
        .ok_or_else(|| anyhow!("unknown stop {}", from))?;
    let to_stop = transit_data
        .stop_by_name(to)
        .ok_or_else(|| anyhow!("unknown stop {}", to))?;
    Ok(RequestInput {
        earliest_datetime: time(earliest),
        latest_datetime: time(latest),
        date: config.date,
        departures_stop_and_fallback_duration: vec![(from_stop, config.departure_fallback)],
        arrivals_stop_and_fallback_duration: vec![(to_stop, config.arrival_fallback)],
        direction: config.direction,
        criteria: config.criteria,
    })
}

pub fn solve(
    transit_data: &TransitData,
    from: &str,
    to: &str,
    earliest: &str,
    latest: &str,
    config: &Config,
) -> Result<Vec<rapido::response::Journey>, Error> {
    let request = make_request(transit_data, from, to, earliest, latest, config)?;
    let mut solver = Solver::new();
    solver
        .solve_request(transit_data, &request, &config.params)
        .map_err(|err: BadRequest| anyhow!("bad request : {}", err))
}
