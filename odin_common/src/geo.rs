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
#![allow(non_snake_case,uncommon_codepoints)]

//! spherical earth geo-metrics for ground-to-aircraft computations.
//! We use the haversine approximation with a mean earth radius in nautical miles, which is the model ADS-B
//! receivers use for their reported ranges.
//!
//! Coordinates are stored as given, i.e. we do not normalize or validate lat/lon degrees. Upstream data outside of
//! [-90,90] / [-180,180] does not cause panics or NaNs from domain errors, but results are meaningless.

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::{sin2, cos, sin, asin, atan2, sqrt, rad, deg};
use crate::angle::normalize_360;
use crate::geo_constants::MEAN_EARTH_RADIUS_NM;

/* #region GeoPoint ***********************************************************************************************/

/// a geographic point in decimal degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPoint {
    #[serde(alias="longitude", alias="lng", alias="x")]
    pub lon: f64,
    #[serde(alias="latitude", alias="y")]
    pub lat: f64,
}

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint { lon, lat }
    }

    /// great circle distance to `other` in nautical miles
    #[inline]
    pub fn distance_nm (&self, other: &GeoPoint)->f64 { haversine_distance_nm( self, other) }

    /// initial great circle bearing from self towards `other` in degrees [0,360)
    #[inline]
    pub fn bearing_to (&self, other: &GeoPoint)->f64 { initial_bearing( self, other) }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lon, self.lat)
    }
}

/* #endregion GeoPoint */

/* #region haversine and bearing **********************************************************************************/

/// haversine distance between two points in nautical miles.
/// The haversine term `h` can exceed 1.0 by a few ulps for (near) antipodal points, which would make
/// `asin(sqrt(h))` return NaN. We clamp it to [0,1] before taking the inverse sine
pub fn haversine_distance_nm (a: &GeoPoint, b: &GeoPoint)->f64 {
    let φ1 = rad( a.lat);
    let φ2 = rad( b.lat);
    let Δφ = φ2 - φ1;
    let Δλ = rad( b.lon - a.lon);

    let h = sin2( Δφ/2.0) + cos(φ1) * cos(φ2) * sin2( Δλ/2.0);
    let c = 2.0 * asin( sqrt( h.clamp( 0.0, 1.0)));

    MEAN_EARTH_RADIUS_NM * c
}

/// initial bearing (forward azimuth) of the great circle path from `from` to `to`, normalized to [0,360).
/// The direction is undefined for identical points, in which case we return whatever atan2(0,0) yields (0.0)
pub fn initial_bearing (from: &GeoPoint, to: &GeoPoint)->f64 {
    let φ1 = rad( from.lat);
    let φ2 = rad( to.lat);
    let Δλ = rad( to.lon - from.lon);

    let y = sin(Δλ) * cos(φ2);
    let x = cos(φ1) * sin(φ2) - sin(φ1) * cos(φ2) * cos(Δλ);

    normalize_360( deg( atan2( y, x)))
}

/* #endregion haversine and bearing */
