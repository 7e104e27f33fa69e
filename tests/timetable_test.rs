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
use rapido::builder::BuildError;
use rapido::time::calendar::Calendar;
use rapido::{PositiveDuration, SecondsSinceDayStart, TimetableBuilder};
use utils::time;

#[test]
fn test_trips_sharing_their_stop_sequence_share_a_pattern() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = TimetableBuilder::default()
        .vj("t0", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .vj("t1", |vj| {
            vj.st("A", "09:10:00", "09:10:00")
                .st("B", "09:40:00", "09:40:00");
        })
        .vj("other", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("C", "09:30:00", "09:30:00");
        })
        .build()?;

    assert_eq!(transit_data.nb_of_stops(), 3);
    assert_eq!(transit_data.nb_of_trips(), 3);
    // t0 and t1 share a pattern, "other" has its own
    assert_eq!(transit_data.nb_of_patterns(), 2);
    Ok(())
}

#[test]
fn test_overtaking_trip_starts_a_sibling_pattern() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = TimetableBuilder::default()
        .vj("slow", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .vj("fast", |vj| {
            // departs later but arrives earlier : not comparable
            vj.st("A", "09:05:00", "09:05:00")
                .st("B", "09:20:00", "09:20:00");
        })
        .build()?;

    assert_eq!(transit_data.nb_of_patterns(), 2);
    Ok(())
}

#[test]
fn test_decreasing_times_are_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("broken", |vj| {
            vj.st("A", "10:00:00", "10:00:00")
                .st("B", "09:00:00", "09:00:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::BadTripTimes(_, _))));
}

#[test]
fn test_departure_before_arrival_is_rejected() {
    utils::init_logger();

    // the vehicle leaves B before it got there
    let result = TimetableBuilder::default()
        .vj("broken", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:29:00")
                .st("C", "09:50:00", "09:50:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::BadTripTimes(_, _))));
}

#[test]
fn test_a_trip_with_one_stop_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("lonely", |vj| {
            vj.st("A", "09:00:00", "09:00:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::NotEnoughStopTimes(_))));
}

#[test]
fn test_a_trip_visiting_a_stop_twice_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("loop", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:10:00", "09:10:00")
                .st("A", "09:20:00", "09:20:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::DuplicateStop(_, _))));
}

#[test]
fn test_duplicated_vehicle_journey_name_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("toto", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .vj("toto", |vj| {
            vj.st("C", "09:00:00", "09:00:00")
                .st("D", "09:30:00", "09:30:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::DuplicateVehicleJourney(_))));
}

#[test]
fn test_unknown_calendar_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("toto", |vj| {
            vj.calendar("nope")
                .st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::UnknownCalendar(_, _))));
}

#[test]
fn test_malformed_time_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("toto", |vj| {
            vj.st("A", "09:61:00", "09:61:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .build();
    assert!(matches!(result, Err(BuildError::BadTimeFormat(_, _))));
}

#[test]
fn test_transfer_to_an_unknown_stop_is_rejected() {
    utils::init_logger();

    let result = TimetableBuilder::default()
        .vj("toto", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .add_transfer("B", "Z", 120)
        .build();
    assert!(matches!(result, Err(BuildError::UnknownStop(_))));
}

#[test]
fn test_time_parsing_and_arithmetic() {
    utils::init_logger();

    assert_eq!(time("10:05:00").total_seconds(), 10 * 3600 + 5 * 60);
    // times past midnight stay attached to their service day
    assert_eq!(time("25:00:00").total_seconds(), 25 * 3600);
    assert!(SecondsSinceDayStart::from_hms_str("10:65:00").is_none());
    assert!(SecondsSinceDayStart::from_hms_str("49:00:00").is_none());
    assert!(SecondsSinceDayStart::from_hms_str("10:00").is_none());

    assert_eq!(format!("{}", time("09:05:03")), "09:05:03");

    let earlier = time("09:00:00");
    let later = time("09:30:00");
    assert_eq!(
        later.duration_since(&earlier),
        Some(PositiveDuration::from_seconds(30 * 60))
    );
    assert_eq!(earlier.duration_since(&later), None);
    assert_eq!(
        earlier.checked_add(PositiveDuration::from_seconds(60)),
        Some(time("09:01:00"))
    );
    assert_eq!(
        earlier.checked_sub(PositiveDuration::from_hms(10, 0, 0)),
        None
    );
}

#[test]
fn test_calendar_resolves_dates() {
    utils::init_logger();

    let first = "2020-01-01".parse().unwrap();
    let last = "2020-01-10".parse().unwrap();
    let calendar = Calendar::new(first, last);

    assert_eq!(calendar.nb_of_days(), 10);
    assert!(calendar.contains_date(&"2020-01-05".parse().unwrap()));
    assert!(!calendar.contains_date(&"2020-02-05".parse().unwrap()));
    assert!(calendar
        .date_to_days_since_start(&"2020-01-10".parse().unwrap())
        .is_some());
    assert!(calendar
        .date_to_days_since_start(&"2019-12-31".parse().unwrap())
        .is_none());
}
