/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the eight 45° compass sectors used for directional queries.
//! Sectors are centered on the cardinal and intercardinal directions and are half-open `[lower,upper)`, so that
//! every bearing in [0,360) falls into exactly one of them. North wraps around 0°

use std::{fmt,str::FromStr};
use serde::{Serialize,Deserialize};

use odin_common::angle::normalize_360;
use crate::errors::{OdinReadsbError,validation_error};

pub const SECTOR_WIDTH_DEG: f64 = 45.0;
pub const HALF_SECTOR_DEG: f64 = SECTOR_WIDTH_DEG / 2.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionSector {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl DirectionSector {
    /// all sectors in clockwise order starting at north
    pub const ALL: [DirectionSector; 8] = [
        DirectionSector::North, DirectionSector::Northeast, DirectionSector::East, DirectionSector::Southeast,
        DirectionSector::South, DirectionSector::Southwest, DirectionSector::West, DirectionSector::Northwest
    ];

    /// the order in which we list valid names in error messages
    const NAME_ORDER: [DirectionSector; 8] = [
        DirectionSector::North, DirectionSector::South, DirectionSector::East, DirectionSector::West,
        DirectionSector::Northeast, DirectionSector::Northwest, DirectionSector::Southeast, DirectionSector::Southwest
    ];

    pub fn name (&self)->&'static str {
        match self {
            DirectionSector::North => "north",
            DirectionSector::Northeast => "northeast",
            DirectionSector::East => "east",
            DirectionSector::Southeast => "southeast",
            DirectionSector::South => "south",
            DirectionSector::Southwest => "southwest",
            DirectionSector::West => "west",
            DirectionSector::Northwest => "northwest",
        }
    }

    /// center bearing of the sector in degrees
    pub fn center (&self)->f64 {
        match self {
            DirectionSector::North => 0.0,
            DirectionSector::Northeast => 45.0,
            DirectionSector::East => 90.0,
            DirectionSector::Southeast => 135.0,
            DirectionSector::South => 180.0,
            DirectionSector::Southwest => 225.0,
            DirectionSector::West => 270.0,
            DirectionSector::Northwest => 315.0,
        }
    }

    /// `(lower,upper)` bounds in degrees. For north the lower bound is larger than the upper bound (337.5,22.5)
    pub fn bearing_range (&self)->(f64,f64) {
        let c = self.center();
        ( normalize_360( c - HALF_SECTOR_DEG), normalize_360( c + HALF_SECTOR_DEG) )
    }

    /// does the (normalized) bearing fall into this sector
    pub fn contains (&self, bearing: f64)->bool {
        let (lower,upper) = self.bearing_range();
        if lower > upper {
            bearing >= lower || bearing < upper
        } else {
            bearing >= lower && bearing < upper
        }
    }

    /// the unique sector that contains `bearing`
    pub fn from_bearing (bearing: f64)->DirectionSector {
        let idx = (normalize_360( bearing + HALF_SECTOR_DEG) / SECTOR_WIDTH_DEG).floor() as usize;
        DirectionSector::ALL[ idx % DirectionSector::ALL.len()]
    }

    pub fn valid_names ()->String {
        DirectionSector::NAME_ORDER.iter().map( |d| d.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for DirectionSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DirectionSector {
    type Err = OdinReadsbError;

    fn from_str (s: &str) -> Result<Self,Self::Err> {
        let s_lower = s.to_lowercase();
        DirectionSector::ALL.iter()
            .find( |d| d.name() == s_lower)
            .copied()
            .ok_or_else( || validation_error( format!("Invalid direction '{}'. Valid directions are: {}", s_lower, DirectionSector::valid_names())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse () {
        assert_eq!( "north".parse::<DirectionSector>().unwrap(), DirectionSector::North);
        assert_eq!( "SouthWest".parse::<DirectionSector>().unwrap(), DirectionSector::Southwest);
        assert_eq!( "EAST".parse::<DirectionSector>().unwrap(), DirectionSector::East);

        let e = "up".parse::<DirectionSector>().unwrap_err();
        assert!( matches!( e, OdinReadsbError::ValidationError(_)));
        let msg = e.to_string();
        assert!( msg.contains("'up'"));

        // the rejected value is echoed lower case
        let msg = "Up".parse::<DirectionSector>().unwrap_err().to_string();
        assert!( msg.starts_with("Invalid direction 'up'. Valid directions are: north, south,"), "{msg}");
        for d in DirectionSector::ALL { assert!( msg.contains( d.name())); }
    }

    #[test]
    fn test_bounds () {
        assert_eq!( DirectionSector::North.bearing_range(), (337.5, 22.5));
        assert_eq!( DirectionSector::East.bearing_range(), (67.5, 112.5));
        assert_eq!( DirectionSector::Northwest.bearing_range(), (292.5, 337.5));

        assert!( DirectionSector::North.contains( 350.0));
        assert!( DirectionSector::North.contains( 0.0));
        assert!( DirectionSector::North.contains( 337.5));
        assert!( !DirectionSector::North.contains( 22.5));
        assert!( DirectionSector::Northeast.contains( 22.5));
        assert!( !DirectionSector::North.contains( 180.0));
    }

    #[test]
    fn test_exactly_one_sector () {
        let mut b = 0.0;
        while b < 360.0 {
            let matching: Vec<DirectionSector> = DirectionSector::ALL.iter().copied().filter( |d| d.contains(b)).collect();
            assert_eq!( matching.len(), 1, "bearing {b} in {matching:?}");
            assert_eq!( matching[0], DirectionSector::from_bearing(b), "bearing {b}");
            b += 0.25;
        }
        for b in [22.5, 67.5, 112.5, 157.5, 202.5, 247.5, 292.5, 337.5, 359.999999] {
            let n = DirectionSector::ALL.iter().filter( |d| d.contains(b)).count();
            assert_eq!( n, 1, "bearing {b}");
        }
    }
}
