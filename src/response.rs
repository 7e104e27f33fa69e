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

use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::transit_data::data_interface::Data;
use crate::transit_data::{Position, Transfer, TransitData, Trip};

#[derive(Debug, Clone)]
pub struct VehicleLeg {
    pub trip: Trip,
    pub board_position: Position,
    pub debark_position: Position,
}

/// A journey, always oriented chronologically whatever the search
/// direction was. A `None` transfer in `connections` is a same-stop
/// interchange.
#[derive(Debug, Clone)]
pub struct Journey {
    pub departure_datetime: SecondsSinceDayStart,
    pub departure_fallback_duration: PositiveDuration,
    pub first_vehicle: VehicleLeg,
    pub connections: Vec<(Option<Transfer>, VehicleLeg)>,
    pub arrival_fallback_duration: PositiveDuration,
    first_vehicle_board_datetime: SecondsSinceDayStart,
    last_vehicle_debark_datetime: SecondsSinceDayStart,
    arrival_datetime: SecondsSinceDayStart,
}

#[derive(Debug, Clone)]
pub enum VehicleLegIdx {
    First,
    Connection(usize),
}

#[derive(Debug, Clone)]
pub enum BadJourney {
    DebarkIsUpstreamBoard(VehicleLeg, VehicleLegIdx),
    BadTransferStartStop(VehicleLeg, Transfer, usize),
    BadTransferEndStop(Transfer, VehicleLeg, usize),
    BadTransferEndTime(Transfer, VehicleLeg, usize),
    BadSameStopInterchange(VehicleLeg, VehicleLeg, usize),
    TimeOutOfBounds,
}

impl Journey {
    /// Build a journey and check it against the timetable : board
    /// upstream of debark on every leg, transfer endpoints chaining
    /// the legs, waiting times non-negative.
    pub fn new<D: Data>(
        departure_datetime: SecondsSinceDayStart,
        departure_fallback_duration: PositiveDuration,
        first_vehicle: VehicleLeg,
        connections: impl Iterator<Item = (Option<Transfer>, VehicleLeg)>,
        arrival_fallback_duration: PositiveDuration,
        data: &D,
    ) -> Result<Self, BadJourney> {
        let connections: Vec<_> = connections.collect();

        check_vehicle_leg(&first_vehicle, VehicleLegIdx::First, data)?;

        let mut prev_debark_stop = data.stop_at(
            &first_vehicle.debark_position.pattern,
            first_vehicle.debark_position.idx,
        );
        let mut prev_debark_time =
            data.debark_time_of(&first_vehicle.trip, first_vehicle.debark_position.idx);
        let mut prev_vehicle_leg = &first_vehicle;

        for (idx, (has_transfer, vehicle_leg)) in connections.iter().enumerate() {
            check_vehicle_leg(vehicle_leg, VehicleLegIdx::Connection(idx), data)?;

            let board_stop = data.stop_at(
                &vehicle_leg.board_position.pattern,
                vehicle_leg.board_position.idx,
            );
            let board_time = data.board_time_of(&vehicle_leg.trip, vehicle_leg.board_position.idx);

            match has_transfer {
                Some(transfer) => {
                    let transfer_start_stop = data.transfer_start_stop(transfer);
                    if prev_debark_stop != transfer_start_stop {
                        return Err(BadJourney::BadTransferStartStop(
                            prev_vehicle_leg.clone(),
                            *transfer,
                            idx,
                        ));
                    }
                    let (transfer_end_stop, transfer_duration) = data.transfer(transfer);
                    if transfer_end_stop != board_stop {
                        return Err(BadJourney::BadTransferEndStop(
                            *transfer,
                            vehicle_leg.clone(),
                            idx,
                        ));
                    }
                    let end_transfer_time = prev_debark_time
                        .checked_add(transfer_duration)
                        .ok_or(BadJourney::TimeOutOfBounds)?;
                    if end_transfer_time > board_time {
                        return Err(BadJourney::BadTransferEndTime(
                            *transfer,
                            vehicle_leg.clone(),
                            idx,
                        ));
                    }
                }
                None => {
                    // same-stop interchange
                    if prev_debark_stop != board_stop || prev_debark_time > board_time {
                        return Err(BadJourney::BadSameStopInterchange(
                            prev_vehicle_leg.clone(),
                            vehicle_leg.clone(),
                            idx,
                        ));
                    }
                }
            }

            prev_debark_stop = data.stop_at(
                &vehicle_leg.debark_position.pattern,
                vehicle_leg.debark_position.idx,
            );
            prev_debark_time = data.debark_time_of(&vehicle_leg.trip, vehicle_leg.debark_position.idx);
            prev_vehicle_leg = vehicle_leg;
        }

        let first_vehicle_board_datetime =
            data.board_time_of(&first_vehicle.trip, first_vehicle.board_position.idx);
        let last_vehicle_debark_datetime = prev_debark_time;
        let arrival_datetime = last_vehicle_debark_datetime
            .checked_add(arrival_fallback_duration)
            .ok_or(BadJourney::TimeOutOfBounds)?;

        Ok(Self {
            departure_datetime,
            departure_fallback_duration,
            first_vehicle,
            connections,
            arrival_fallback_duration,
            first_vehicle_board_datetime,
            last_vehicle_debark_datetime,
            arrival_datetime,
        })
    }

    pub fn first_vehicle_board_datetime(&self) -> SecondsSinceDayStart {
        self.first_vehicle_board_datetime
    }

    pub fn last_vehicle_debark_datetime(&self) -> SecondsSinceDayStart {
        self.last_vehicle_debark_datetime
    }

    pub fn arrival_datetime(&self) -> SecondsSinceDayStart {
        self.arrival_datetime
    }

    /// Total duration, street fallbacks included
    pub fn total_duration(&self) -> PositiveDuration {
        // arrival is after departure by construction
        self.arrival_datetime
            .duration_since(&self.departure_datetime)
            .unwrap_or_else(PositiveDuration::zero)
    }

    pub fn total_transfer_duration<D: Data>(&self, data: &D) -> PositiveDuration {
        let mut result = PositiveDuration::zero();
        for (has_transfer, _) in &self.connections {
            if let Some(transfer) = has_transfer {
                let (_, transfer_duration) = data.transfer(transfer);
                result = result + transfer_duration;
            }
        }
        result
    }

    pub fn nb_of_sections(&self) -> usize {
        self.connections.len() + 1
    }

    pub fn nb_of_transfers(&self) -> usize {
        self.connections.len()
    }

    pub fn first_trip_name<'a>(&self, transit_data: &'a TransitData) -> &'a str {
        transit_data.trip_name(&self.first_vehicle.trip)
    }

    pub fn print(&self, transit_data: &TransitData) -> Result<String, std::fmt::Error> {
        let mut result = String::new();
        self.write(transit_data, &mut result)?;
        Ok(result)
    }

    pub fn write<Writer: std::fmt::Write>(
        &self,
        transit_data: &TransitData,
        writer: &mut Writer,
    ) -> Result<(), std::fmt::Error> {
        writeln!(writer, "*** New journey ***")?;
        writeln!(writer, "Departure : {}", self.departure_datetime)?;
        writeln!(writer, "Arrival : {}", self.arrival_datetime)?;
        writeln!(writer, "Nb of vehicles : {}", self.nb_of_sections())?;
        self.write_vehicle_leg(&self.first_vehicle, transit_data, writer)?;
        for (has_transfer, vehicle_leg) in &self.connections {
            match has_transfer {
                Some(transfer) => {
                    let start_stop = transit_data.transfer_start_stop(transfer);
                    let (end_stop, duration) = transit_data.transfer(transfer);
                    writeln!(
                        writer,
                        "Transfer from {} to {} ({})",
                        transit_data.stop_name(&start_stop),
                        transit_data.stop_name(&end_stop),
                        duration
                    )?;
                }
                None => {
                    writeln!(writer, "Interchange at the same stop")?;
                }
            }
            self.write_vehicle_leg(vehicle_leg, transit_data, writer)?;
        }
        Ok(())
    }

    fn write_vehicle_leg<Writer: std::fmt::Write>(
        &self,
        vehicle_leg: &VehicleLeg,
        transit_data: &TransitData,
        writer: &mut Writer,
    ) -> Result<(), std::fmt::Error> {
        let board_stop = transit_data.stop_at(
            &vehicle_leg.board_position.pattern,
            vehicle_leg.board_position.idx,
        );
        let debark_stop = transit_data.stop_at(
            &vehicle_leg.debark_position.pattern,
            vehicle_leg.debark_position.idx,
        );
        writeln!(
            writer,
            "{} from {} at {} to {} at {}",
            transit_data.trip_name(&vehicle_leg.trip),
            transit_data.stop_name(&board_stop),
            transit_data.board_time_of(&vehicle_leg.trip, vehicle_leg.board_position.idx),
            transit_data.stop_name(&debark_stop),
            transit_data.debark_time_of(&vehicle_leg.trip, vehicle_leg.debark_position.idx),
        )
    }
}

fn check_vehicle_leg<D: Data>(
    vehicle_leg: &VehicleLeg,
    idx: VehicleLegIdx,
    data: &D,
) -> Result<(), BadJourney> {
    if !data.is_upstream(&vehicle_leg.board_position, &vehicle_leg.debark_position) {
        return Err(BadJourney::DebarkIsUpstreamBoard(vehicle_leg.clone(), idx));
    }
    Ok(())
}

impl std::fmt::Display for BadJourney {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadJourney::DebarkIsUpstreamBoard(_, _) => {
                write!(f, "A vehicle leg debarks upstream of its board position")
            }
            BadJourney::BadTransferStartStop(_, _, idx) => {
                write!(f, "Transfer {} does not start at the previous debark stop", idx)
            }
            BadJourney::BadTransferEndStop(_, _, idx) => {
                write!(f, "Transfer {} does not end at the next board stop", idx)
            }
            BadJourney::BadTransferEndTime(_, _, idx) => {
                write!(f, "Transfer {} ends after the next vehicle board time", idx)
            }
            BadJourney::BadSameStopInterchange(_, _, idx) => {
                write!(f, "Interchange {} chains mismatched stops or times", idx)
            }
            BadJourney::TimeOutOfBounds => {
                write!(f, "A journey time exits the allowed day window")
            }
        }
    }
}

impl std::error::Error for BadJourney {}
