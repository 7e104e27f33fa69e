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
use rapido::{CriteriaType, Direction, TimetableBuilder, TransitData};
use utils::{solve, time, Config};

fn build_hub_timetable() -> Result<TransitData, Error> {
    let transit_data = TimetableBuilder::default()
        .vj("direct", |vj| {
            vj.st("A", "08:10:00", "08:10:00")
                .st("C", "09:10:00", "09:10:00");
        })
        .vj("red", |vj| {
            vj.st("A", "08:05:00", "08:05:00")
                .st("H", "08:25:00", "08:25:00");
        })
        .vj("blue", |vj| {
            vj.st("H", "08:30:00", "08:30:00")
                .st("C", "08:55:00", "08:55:00");
        })
        .build()?;
    Ok(transit_data)
}

#[test]
fn test_backward_search_finds_latest_departure() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let config = Config {
        direction: Direction::Backward,
        ..Default::default()
    };

    // arrive at C by 08:55 : the only way is red then blue, leaving
    // A as late as 08:05
    let journeys = solve(&transit_data, "A", "C", "08:55:00", "08:55:00", &config)?;

    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.nb_of_transfers(), 1);
    assert_eq!(journey.departure_datetime, time("08:05:00"));
    assert_eq!(journey.arrival_datetime(), time("08:55:00"));
    assert_eq!(journey.first_trip_name(&transit_data), "red");
    assert_eq!(journey.first_vehicle_board_datetime(), time("08:05:00"));
    Ok(())
}

#[test]
fn test_forward_and_backward_agree_on_optimal_durations() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;

    // forward over a window wide enough to leave at the best minute
    let forward_config = Config::default();
    let forward_journeys = solve(
        &transit_data,
        "A",
        "C",
        "08:00:00",
        "08:10:00",
        &forward_config,
    )?;

    let forward_best = forward_journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 1)
        .expect("no forward journey with one transfer");
    assert_eq!(forward_best.departure_datetime, time("08:05:00"));
    assert_eq!(forward_best.arrival_datetime(), time("08:55:00"));

    // backward from the forward optimum arrival
    let backward_config = Config {
        direction: Direction::Backward,
        ..Default::default()
    };
    let backward_journeys = solve(
        &transit_data,
        "A",
        "C",
        "08:55:00",
        "08:55:00",
        &backward_config,
    )?;
    let backward_best = backward_journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 1)
        .expect("no backward journey with one transfer");

    assert_eq!(
        forward_best.total_duration(),
        backward_best.total_duration()
    );
    assert_eq!(
        forward_best.nb_of_transfers(),
        backward_best.nb_of_transfers()
    );
    assert_eq!(
        forward_best.departure_datetime,
        backward_best.departure_datetime
    );
    Ok(())
}

#[test]
fn test_backward_direct_trip() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let config = Config {
        direction: Direction::Backward,
        ..Default::default()
    };

    // arrive at C by 09:10 : both the direct trip and the transfer
    // route fit, with a departure / transfers tradeoff
    let journeys = solve(&transit_data, "A", "C", "09:10:00", "09:10:00", &config)?;

    assert_eq!(journeys.len(), 2);
    let direct = journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 0)
        .expect("no direct journey");
    assert_eq!(direct.departure_datetime, time("08:10:00"));
    assert_eq!(direct.arrival_datetime(), time("09:10:00"));

    let with_transfer = journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 1)
        .expect("no journey with one transfer");
    assert_eq!(with_transfer.departure_datetime, time("08:05:00"));
    assert_eq!(with_transfer.arrival_datetime(), time("08:55:00"));
    Ok(())
}

#[test]
fn test_backward_min_arrival_variant() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let config = Config {
        direction: Direction::Backward,
        criteria: CriteriaType::MinArrival,
        ..Default::default()
    };

    let journeys = solve(&transit_data, "A", "C", "08:55:00", "08:55:00", &config)?;
    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].departure_datetime, time("08:05:00"));
    assert_eq!(journeys[0].nb_of_transfers(), 1);
    Ok(())
}
