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

use std::slice::Iter as SliceIter;
use std::vec::Drain as DrainIter;

/// A set of elements with pairwise non-comparable criteria.
///
/// `is_lower(a, b)` must return `true` when `a` is better than or
/// equivalent to `b`. It is supplied by the caller on each operation,
/// as its meaning depends on the search direction.
#[derive(Debug, Clone)]
pub struct ParetoFront<Id, Crit> {
    elements: Vec<(Id, Crit)>,
}

impl<Id: Clone, Crit: Clone> ParetoFront<Id, Crit> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn dominates<IsLower>(&self, criteria: &Crit, is_lower: IsLower) -> bool
    where
        IsLower: Fn(&Crit, &Crit) -> bool,
    {
        self.elements
            .iter()
            .any(|(_, old_criteria)| is_lower(old_criteria, criteria))
    }

    pub fn add_unchecked(&mut self, id: Id, criteria: Crit) {
        self.elements.push((id, criteria));
    }

    pub fn remove_elements_dominated_by<IsLower>(&mut self, criteria: &Crit, is_lower: IsLower)
    where
        IsLower: Fn(&Crit, &Crit) -> bool,
    {
        self.elements
            .retain(|(_, old_criteria)| !is_lower(criteria, old_criteria));
    }

    pub fn add_and_remove_elements_dominated<IsLower>(
        &mut self,
        id: Id,
        criteria: Crit,
        is_lower: IsLower,
    ) where
        IsLower: Fn(&Crit, &Crit) -> bool,
    {
        self.remove_elements_dominated_by(&criteria, &is_lower);
        self.add_unchecked(id, criteria);
    }

    /// Add `(id, criteria)` unless it is dominated, removing the
    /// elements it dominates
    pub fn add<IsLower>(&mut self, id: Id, criteria: Crit, is_lower: IsLower)
    where
        IsLower: Fn(&Crit, &Crit) -> bool,
    {
        if self.dominates(&criteria, &is_lower) {
            return;
        }
        self.add_and_remove_elements_dominated(id, criteria, &is_lower);
    }

    pub fn iter(&self) -> SliceIter<'_, (Id, Crit)> {
        self.elements.iter()
    }

    pub fn drain(&mut self) -> DrainIter<'_, (Id, Crit)> {
        self.elements.drain(..)
    }
}

impl<Id: Clone, Crit: Clone> Default for ParetoFront<Id, Crit> {
    fn default() -> Self {
        Self::new()
    }
}
