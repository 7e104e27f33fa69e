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

mod utils;

use anyhow::Error;
use rapido::{CriteriaType, TimetableBuilder};
use utils::{duration, solve, time, Config};

fn build_single_trip() -> Result<rapido::TransitData, Error> {
    let transit_data = TimetableBuilder::default()
        .vj("toto", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .build()?;
    Ok(transit_data)
}

#[test]
fn test_single_direct_trip() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_single_trip()?;
    assert_eq!(transit_data.nb_of_trips(), 1);

    let config = Config {
        departure_fallback: duration(3 * 60),
        arrival_fallback: duration(2 * 60),
        ..Default::default()
    };
    let journeys = solve(&transit_data, "A", "B", "08:50:00", "08:50:00", &config)?;

    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.nb_of_transfers(), 0);
    assert_eq!(journey.nb_of_sections(), 1);
    assert_eq!(journey.departure_datetime, time("08:50:00"));
    assert_eq!(journey.first_vehicle_board_datetime(), time("09:00:00"));
    assert_eq!(journey.last_vehicle_debark_datetime(), time("09:30:00"));
    assert_eq!(journey.arrival_datetime(), time("09:32:00"));
    // 3 min walk, 7 min wait, 30 min ride, 2 min walk
    assert_eq!(journey.total_duration().total_seconds(), 42 * 60);
    assert_eq!(journey.first_trip_name(&transit_data), "toto");
    Ok(())
}

#[test]
fn test_single_direct_trip_min_arrival() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_single_trip()?;
    let config = Config {
        criteria: CriteriaType::MinArrival,
        departure_fallback: duration(3 * 60),
        arrival_fallback: duration(2 * 60),
        ..Default::default()
    };
    let journeys = solve(&transit_data, "A", "B", "08:50:00", "08:50:00", &config)?;

    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.arrival_datetime(), time("09:32:00"));
    assert_eq!(journey.nb_of_transfers(), 0);
    Ok(())
}

#[test]
fn test_too_late_departure_finds_nothing() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_single_trip()?;
    let config = Config::default();
    let journeys = solve(&transit_data, "A", "B", "09:01:00", "09:01:00", &config)?;
    assert!(journeys.is_empty());
    Ok(())
}

#[test]
fn test_board_slack_is_honored() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = TimetableBuilder::default()
        .vj("early", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .vj("late", |vj| {
            vj.st("A", "09:05:00", "09:05:00")
                .st("B", "09:35:00", "09:35:00");
        })
        .build()?;

    let mut config = Config::default();
    config.params.board_slack = duration(2 * 60);

    // at stop A at 08:59, a 2 min board slack forbids the 09:00 trip
    let journeys = solve(&transit_data, "A", "B", "08:59:00", "08:59:00", &config)?;
    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.first_vehicle_board_datetime(), time("09:05:00"));
    assert!(
        journey
            .first_vehicle_board_datetime()
            .duration_since(&journey.departure_datetime)
            .unwrap()
            >= config.params.board_slack
    );
    Ok(())
}
