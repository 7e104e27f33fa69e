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
use rapido::{CriteriaType, TimetableBuilder, TransitData};
use utils::{solve, time, Config};

// a direct route in 70 minutes, and a faster one-transfer route
// through the hub H in 55 minutes
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
fn test_one_transfer_advantage() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let config = Config::default();
    let journeys = solve(&transit_data, "A", "C", "08:00:00", "08:00:00", &config)?;

    // the Pareto set holds both the slow direct journey and the
    // faster one with a transfer
    assert_eq!(journeys.len(), 2);

    let with_transfer = journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 1)
        .expect("no journey with one transfer");
    assert_eq!(with_transfer.arrival_datetime(), time("08:55:00"));
    assert_eq!(with_transfer.first_trip_name(&transit_data), "red");
    assert_eq!(with_transfer.nb_of_sections(), 2);

    let direct = journeys
        .iter()
        .find(|journey| journey.nb_of_transfers() == 0)
        .expect("no direct journey");
    assert_eq!(direct.arrival_datetime(), time("09:10:00"));
    assert_eq!(direct.first_trip_name(&transit_data), "direct");

    // pareto minimality : no journey dominates another
    for a in &journeys {
        for b in &journeys {
            if std::ptr::eq(a, b) {
                continue;
            }
            let dominates = a.departure_datetime >= b.departure_datetime
                && a.arrival_datetime() <= b.arrival_datetime()
                && a.nb_of_transfers() <= b.nb_of_transfers();
            assert!(!dominates);
        }
    }
    Ok(())
}

#[test]
fn test_one_transfer_advantage_min_arrival() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let config = Config {
        criteria: CriteriaType::MinArrival,
        ..Default::default()
    };
    let journeys = solve(&transit_data, "A", "C", "08:00:00", "08:00:00", &config)?;

    assert_eq!(journeys.len(), 2);
    let arrivals: Vec<_> = journeys
        .iter()
        .map(|journey| (journey.arrival_datetime(), journey.nb_of_transfers()))
        .collect();
    assert!(arrivals.contains(&(time("09:10:00"), 0)));
    assert!(arrivals.contains(&(time("08:55:00"), 1)));
    Ok(())
}

#[test]
fn test_max_nb_of_transfers_cuts_deeper_journeys() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_hub_timetable()?;
    let mut config = Config::default();
    config.params.max_nb_of_transfers = 0;

    let journeys = solve(&transit_data, "A", "C", "08:00:00", "08:00:00", &config)?;

    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].nb_of_transfers(), 0);
    assert_eq!(journeys[0].arrival_datetime(), time("09:10:00"));
    Ok(())
}

#[test]
fn test_explicit_transfer_between_distinct_stops() -> Result<(), Error> {
    utils::init_logger();

    // the two halves of the journey meet at two distinct stops of the
    // same hub, joined by a 2 minute walk
    let transit_data = TimetableBuilder::default()
        .vj("red", |vj| {
            vj.st("A", "08:05:00", "08:05:00")
                .st("H1", "08:25:00", "08:25:00");
        })
        .vj("blue", |vj| {
            vj.st("H2", "08:30:00", "08:30:00")
                .st("C", "08:55:00", "08:55:00");
        })
        .add_transfer("H1", "H2", 120)
        .build()?;

    let config = Config::default();
    let journeys = solve(&transit_data, "A", "C", "08:00:00", "08:00:00", &config)?;

    assert_eq!(journeys.len(), 1);
    let journey = &journeys[0];
    assert_eq!(journey.nb_of_transfers(), 1);
    assert_eq!(journey.arrival_datetime(), time("08:55:00"));
    let (has_transfer, _) = &journey.connections[0];
    assert!(has_transfer.is_some());
    Ok(())
}

#[test]
fn test_transfer_too_slow_to_catch_the_connection() -> Result<(), Error> {
    utils::init_logger();

    // 6 minutes of walk, but the connection leaves 5 minutes after
    let transit_data = TimetableBuilder::default()
        .vj("red", |vj| {
            vj.st("A", "08:05:00", "08:05:00")
                .st("H1", "08:25:00", "08:25:00");
        })
        .vj("blue", |vj| {
            vj.st("H2", "08:30:00", "08:30:00")
                .st("C", "08:55:00", "08:55:00");
        })
        .add_transfer("H1", "H2", 6 * 60)
        .build()?;

    let config = Config::default();
    let journeys = solve(&transit_data, "A", "C", "08:00:00", "08:00:00", &config)?;
    assert!(journeys.is_empty());
    Ok(())
}

#[test]
fn test_loop_transfers_are_inert() -> Result<(), Error> {
    utils::init_logger();

    let without_loops = build_hub_timetable()?;
    let with_loops = TimetableBuilder::default()
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
        .add_transfer("H", "H", 60)
        .add_transfer("A", "A", 60)
        .build()?;

    let config = Config::default();
    let reference = solve(&without_loops, "A", "C", "08:00:00", "08:00:00", &config)?;
    let journeys = solve(&with_loops, "A", "C", "08:00:00", "08:00:00", &config)?;

    assert_eq!(journeys.len(), reference.len());
    for (journey, expected) in journeys.iter().zip(reference.iter()) {
        assert_eq!(journey.departure_datetime, expected.departure_datetime);
        assert_eq!(journey.arrival_datetime(), expected.arrival_datetime());
        assert_eq!(journey.nb_of_transfers(), expected.nb_of_transfers());
    }
    Ok(())
}
