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
use rapido::engine::pareto_front::ParetoFront;
use rapido::engine::timers::PerformanceTimers;
use rapido::engine::trip_search::{
    TripScheduleAlightSearch, TripScheduleBoardSearch, TripScheduleSearch,
};
use rapido::engine::{
    ArriveBefore, DepartAfter, MinArrivalState, RangeRaptorWorker, SearchContext,
    TransitCalculator,
};
use rapido::transit_data::data_interface::Data;
use rapido::transit_data::filtered::TransitDataFiltered;
use rapido::{PositiveDuration, RequestParams, TimetableBuilder, TransitData};
use utils::time;

// three trips on one pattern, the middle one out of service on the
// search day
fn build_three_trips() -> Result<TransitData, Error> {
    let transit_data = TimetableBuilder::new("2020-01-01", "2020-01-02")
        .calendar("day_two", &["2020-01-02"])
        .vj("t0", |vj| {
            vj.st("A", "09:00:00", "09:00:00")
                .st("B", "09:30:00", "09:30:00");
        })
        .vj("t1", |vj| {
            vj.calendar("day_two")
                .st("A", "09:10:00", "09:10:00")
                .st("B", "09:40:00", "09:40:00");
        })
        .vj("t2", |vj| {
            vj.st("A", "09:20:00", "09:20:00")
                .st("B", "09:50:00", "09:50:00");
        })
        .build()?;
    Ok(transit_data)
}

fn day_one(transit_data: &TransitData) -> rapido::time::DaysSinceDatasetStart {
    transit_data
        .calendar()
        .date_to_days_since_start(&utils::default_date())
        .unwrap()
}

#[test]
fn test_board_search_skips_trips_out_of_service() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_three_trips()?;
    assert_eq!(transit_data.nb_of_patterns(), 1);
    let pattern = transit_data.patterns().next().unwrap();

    let mut data = TransitDataFiltered::new(&transit_data, day_one(&transit_data));
    data.init();

    // both scan strategies must agree
    for threshold in [0, 100] {
        let mut search = TripScheduleBoardSearch::new(&data, pattern, threshold);

        // 09:10 departs in between, but does not run today
        let found = search.search(&time("09:05:00"), 0, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t2");
        assert_eq!(found.trip_time, time("09:20:00"));

        // later target : the scan may resume from the found trip
        let found = search.search(&time("09:15:00"), 0, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t2");

        // earlier target : the scan must restart
        let found = search.search(&time("08:00:00"), 0, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t0");

        // bounded by the first trip : nothing strictly earlier
        assert!(search.search(&time("08:00:00"), 0, Some(0)).is_none());

        // after the last trip
        assert!(search.search(&time("10:00:00"), 0, None).is_none());
    }
    Ok(())
}

#[test]
fn test_alight_search_finds_latest_trip() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_three_trips()?;
    let pattern = transit_data.patterns().next().unwrap();

    let mut data = TransitDataFiltered::new(&transit_data, day_one(&transit_data));
    data.init();

    for threshold in [0, 100] {
        let mut search = TripScheduleAlightSearch::new(&data, pattern, threshold);

        // 09:40 would fit, but does not run today
        let found = search.search(&time("09:45:00"), 1, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t0");
        assert_eq!(found.trip_time, time("09:30:00"));

        // earlier target : the scan may resume downward
        let found = search.search(&time("09:35:00"), 1, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t0");

        // later target : the scan must restart from the top
        let found = search.search(&time("10:00:00"), 1, None).unwrap();
        assert_eq!(transit_data.trip_name(&found.trip), "t2");

        // bounded by the last trip : nothing strictly later
        assert!(search.search(&time("10:00:00"), 1, Some(2)).is_none());

        // before the first trip
        assert!(search.search(&time("09:00:00"), 1, None).is_none());
    }
    Ok(())
}

#[test]
fn test_pareto_front_dominance() {
    utils::init_logger();

    let is_lower = |a: &(u32, u32), b: &(u32, u32)| a.0 <= b.0 && a.1 <= b.1;
    let mut front: ParetoFront<usize, (u32, u32)> = ParetoFront::new();

    front.add(0, (5, 1), is_lower);
    assert_eq!(front.len(), 1);

    // dominated, ignored
    front.add(1, (6, 2), is_lower);
    assert_eq!(front.len(), 1);

    // incomparable tradeoff, kept
    front.add(2, (4, 2), is_lower);
    assert_eq!(front.len(), 2);

    // dominates everything
    front.add(3, (4, 1), is_lower);
    assert_eq!(front.len(), 1);

    // an equivalent element coalesces
    front.add(4, (4, 1), is_lower);
    assert_eq!(front.len(), 1);
}

#[test]
fn test_range_raptor_minutes_iteration_order() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_three_trips()?;
    let mut data = TransitDataFiltered::new(&transit_data, day_one(&transit_data));
    data.init();

    let forward = DepartAfter::new(&data, time("08:00:00"), time("08:03:00"), PositiveDuration::zero(), 8);
    let minutes: Vec<_> = forward.range_raptor_minutes().collect();
    assert_eq!(
        minutes,
        vec![
            time("08:03:00"),
            time("08:02:00"),
            time("08:01:00"),
            time("08:00:00")
        ]
    );

    let backward = ArriveBefore::new(&data, time("08:00:00"), time("08:02:00"), PositiveDuration::zero(), 8);
    let minutes: Vec<_> = backward.range_raptor_minutes().collect();
    assert_eq!(
        minutes,
        vec![time("08:00:00"), time("08:01:00"), time("08:02:00")]
    );
    Ok(())
}

#[test]
fn test_every_minute_of_the_window_runs_a_round() -> Result<(), Error> {
    utils::init_logger();

    let transit_data = build_three_trips()?;
    let mut data = TransitDataFiltered::new(&transit_data, day_one(&transit_data));
    data.init();

    let from = transit_data.stop_by_name("A").unwrap();
    let to = transit_data.stop_by_name("B").unwrap();

    let calculator = DepartAfter::new(
        &data,
        time("08:00:00"),
        time("08:04:00"),
        PositiveDuration::zero(),
        8,
    );
    let state = MinArrivalState::new(data.nb_of_stops(), 12, &[(to, PositiveDuration::zero())]);
    let context = SearchContext {
        data: &data,
        entry_stop_and_fallback_duration: vec![(from, PositiveDuration::zero())],
        exit_stop_and_fallback_duration: vec![(to, PositiveDuration::zero())],
        params: RequestParams::default(),
    };

    let mut worker = RangeRaptorWorker::new(context, calculator, state, PerformanceTimers::new());
    let journeys = worker.route();

    // the access seeding of every minute improves its stop, so every
    // one of the 5 minutes runs at least one transit round
    assert!(worker.timers().nb_of_transit_rounds >= 5);
    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].first_vehicle_board_datetime(), time("09:00:00"));

    Ok(())
}
