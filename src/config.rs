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

use serde::Deserialize;

use crate::time::PositiveDuration;

pub const DEFAULT_MAX_NB_OF_TRANSFERS: u8 = 12;

/// Number of trips in a pattern above which the trip searches
/// position themselves with a binary search instead of a linear scan.
pub const DEFAULT_BINARY_SEARCH_THRESHOLD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl std::str::FromStr for Direction {
    type Err = DirectionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = match s {
            "forward" => Direction::Forward,
            "backward" => Direction::Backward,
            _ => {
                return Err(DirectionError {
                    direction_name: s.to_string(),
                })
            }
        };
        Ok(direction)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

#[derive(Debug)]
pub struct DirectionError {
    direction_name: String,
}

impl std::fmt::Display for DirectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bad direction given : `{}`", self.direction_name)
    }
}

impl std::error::Error for DirectionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaType {
    MinArrival,
    Pareto,
}

impl std::str::FromStr for CriteriaType {
    type Err = CriteriaTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let criteria_type = match s {
            "min_arrival" => CriteriaType::MinArrival,
            "pareto" => CriteriaType::Pareto,
            _ => {
                return Err(CriteriaTypeError {
                    criteria_type_name: s.to_string(),
                })
            }
        };
        Ok(criteria_type)
    }
}

impl std::fmt::Display for CriteriaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriteriaType::MinArrival => write!(f, "min_arrival"),
            CriteriaType::Pareto => write!(f, "pareto"),
        }
    }
}

impl Default for CriteriaType {
    fn default() -> Self {
        CriteriaType::Pareto
    }
}

#[derive(Debug)]
pub struct CriteriaTypeError {
    criteria_type_name: String,
}

impl std::fmt::Display for CriteriaTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bad criteria given : `{}`", self.criteria_type_name)
    }
}

impl std::error::Error for CriteriaTypeError {}

/// Tuning parameters of a search.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestParams {
    pub max_nb_of_transfers: u8,
    pub board_slack: PositiveDuration,
    pub alight_slack: PositiveDuration,
    pub binary_search_threshold: usize,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            max_nb_of_transfers: DEFAULT_MAX_NB_OF_TRANSFERS,
            board_slack: PositiveDuration::zero(),
            alight_slack: PositiveDuration::zero(),
            binary_search_threshold: DEFAULT_BINARY_SEARCH_THRESHOLD,
        }
    }
}
