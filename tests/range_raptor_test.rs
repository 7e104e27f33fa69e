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
use rapido::{SecondsSinceDayStart, TimetableBuilder, TransitData};
use utils::{solve, time, Config};

// one pattern from A to C through B, one trip every 10 minutes
fn build_frequency_like_timetable() -> Result<TransitData, Error> {
    let mut builder = TimetableBuilder::default();
    // departures from A at 07:10 .. 08:30
    for idx in 0..9u32 {
        let minutes = 10 + idx * 10;
        let name = format!("vj_{}", idx);
        let at_a = hms(7 * 60 + minutes);
        let at_b = hms(7 * 60 + minutes + 10);
        let at_c = hms(7 * 60 + minutes + 20);
        builder = builder.vj(&name, |vj| {
            vj.st("A", &at_a, &at_a).st("B", &at_b, &at_b).st("C", &at_c, &at_c);
        });
    }
    Ok(builder.build()?)
}

fn hms(total_minutes: u32) -> String {
    format!("{:02}:{:02}:00", total_minutes / 60, total_minutes % 60)
}

fn best_arrival(
    transit_data: &TransitData,
    minute: &str,
    config: &Config,
) -> Result<Option<SecondsSinceDayStart>, Error> {
    let journeys = solve(transit_data, "A", "C", minute, minute, config)?;
    Ok(journeys
        .iter()
        .map(|journey| journey.arrival_datetime())
        .min())
}

#[test]
fn test_range_raptor_monotonicity() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_frequency_like_timetable()?;
    let config = Config::default();

    // for departure minutes t < t', the best arrival given t is
    // never later than the best arrival given t'
    let mut previous: Option<SecondsSinceDayStart> = None;
    for minute in 0..=60 {
        let minute_str = hms(7 * 60 + minute);
        let arrival = best_arrival(&transit_data, &minute_str, &config)?;
        let arrival = arrival.expect("every minute of the window can reach C");
        if let Some(previous_arrival) = previous {
            assert!(
                previous_arrival <= arrival,
                "arrival for minute {} is earlier than for the previous minute",
                minute_str
            );
        }
        previous = Some(arrival);
    }
    Ok(())
}

#[test]
fn test_range_search_agrees_with_single_minute_searches() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_frequency_like_timetable()?;
    let config = Config::default();

    let range_journeys = solve(&transit_data, "A", "C", "07:00:00", "08:00:00", &config)?;

    // one journey per trip departing within the window, each leaving
    // as late as possible
    assert_eq!(range_journeys.len(), 6);
    for journey in &range_journeys {
        assert_eq!(journey.departure_datetime, journey.first_vehicle_board_datetime());
    }

    // every single-minute optimum is matched by a range journey
    // departing no earlier and arriving no later
    for minute in 0..=60 {
        let minute_str = hms(7 * 60 + minute);
        let minute_time = time(&minute_str);
        let single = best_arrival(&transit_data, &minute_str, &config)?
            .expect("every minute of the window can reach C");
        let matched = range_journeys.iter().any(|journey| {
            journey.departure_datetime >= minute_time && journey.arrival_datetime() <= single
        });
        assert!(matched, "no range journey covers minute {}", minute_str);
    }
    Ok(())
}

#[test]
fn test_range_window_before_any_trip() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_frequency_like_timetable()?;
    let config = Config::default();
    // the whole window is after the last trip of the day
    let journeys = solve(&transit_data, "A", "C", "09:00:00", "09:30:00", &config)?;
    assert!(journeys.is_empty());
    Ok(())
}
