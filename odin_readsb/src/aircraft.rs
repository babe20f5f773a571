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

//! the data model for readsb/Ultrafeeder JSON endpoints (`aircraft.json`, `receiver.json` and `stats.json`).
//! We only name the fields we compute with. Everything else the receiver reports is kept in `other`
//! maps so that JSON output passes it through unchanged

use std::fmt;
use serde::{Serialize,Deserialize,Serializer,Deserializer,de};
use serde_json::{Map,Value};

use odin_common::{datetime::EpochMillis, geo::GeoPoint};
use crate::errors::{Result,precondition_error};

/* #region Altitude ***********************************************************************************************/

/// barometric altitude as reported by readsb, which is either a number of feet or the literal "ground"
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Altitude {
    Ground,
    Feet(f64)
}

impl Altitude {
    /// altitude in feet, with ground counting as 0
    pub fn feet (&self)->f64 {
        match self {
            Altitude::Ground => 0.0,
            Altitude::Feet(ft) => *ft
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Altitude::Ground => write!(f, "ground"),
            Altitude::Feet(ft) => write!(f, "{}", ft)
        }
    }
}

impl Serialize for Altitude {
    fn serialize<S: Serializer> (&self, serializer: S) -> std::result::Result<S::Ok,S::Error> {
        match self {
            Altitude::Ground => serializer.serialize_str("ground"),
            Altitude::Feet(ft) => {
                if ft.fract() == 0.0 && ft.abs() < i64::MAX as f64 {
                    serializer.serialize_i64( *ft as i64)
                } else {
                    serializer.serialize_f64( *ft)
                }
            }
        }
    }
}

struct AltitudeVisitor;

impl<'de> de::Visitor<'de> for AltitudeVisitor {
    type Value = Altitude;

    fn expecting (&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "altitude in feet or \"ground\"")
    }

    fn visit_i64<E: de::Error> (self, v: i64) -> std::result::Result<Altitude,E> { Ok( Altitude::Feet( v as f64)) }
    fn visit_u64<E: de::Error> (self, v: u64) -> std::result::Result<Altitude,E> { Ok( Altitude::Feet( v as f64)) }
    fn visit_f64<E: de::Error> (self, v: f64) -> std::result::Result<Altitude,E> { Ok( Altitude::Feet( v)) }

    fn visit_str<E: de::Error> (self, v: &str) -> std::result::Result<Altitude,E> {
        if v.eq_ignore_ascii_case("ground") {
            Ok( Altitude::Ground)
        } else {
            Err( E::invalid_value( de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Altitude {
    fn deserialize<D: Deserializer<'de>> (deserializer: D) -> std::result::Result<Altitude,D::Error> {
        deserializer.deserialize_any( AltitudeVisitor)
    }
}

/* #endregion Altitude */

/* #region Aircraft ***********************************************************************************************/

/// one entry of the `aircraft` array in readsb's `aircraft.json`.
/// Any field can be missing, including the ICAO address
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct Aircraft {
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub hex: Option<String>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub flight: Option<String>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub alt_baro: Option<Altitude>,

    /// ground speed in knots
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub gs: Option<f64>,

    /// true track over ground in degrees
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub track: Option<f64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub lat: Option<f64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub lon: Option<f64>,

    /// distance from receiver in nm as computed by readsb (only set for receivers with configured location)
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub r_dst: Option<f64>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

impl Aircraft {
    /// the flight identifier without the space padding readsb keeps. None if missing or blank
    pub fn callsign (&self)->Option<&str> {
        self.flight.as_deref().map( str::trim).filter( |s| !s.is_empty())
    }

    pub fn hex (&self)->Option<&str> {
        self.hex.as_deref()
    }

    /// position if both coordinates are reported
    pub fn position (&self)->Option<GeoPoint> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) => Some( GeoPoint::from_lon_lat_degrees( lon, lat)),
            _ => None
        }
    }

    pub fn has_position (&self)->bool { self.lat.is_some() && self.lon.is_some() }

    /// barometric altitude in feet with "ground" and missing values counting as 0
    pub fn altitude_ft (&self)->f64 {
        self.alt_baro.map( |alt| alt.feet()).unwrap_or(0.0)
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex().unwrap_or("?"))?;
        if let Some(cs) = self.callsign() { write!(f, " {}", cs)?; }
        if let Some(pos) = self.position() { write!(f, " {}", pos)?; }
        if let Some(alt) = &self.alt_baro { write!(f, " alt:{}", alt)?; }
        Ok(())
    }
}

/* #endregion Aircraft */

/* #region snapshot, receiver and stats ***************************************************************************/

/// the contents of `aircraft.json` at one point in time
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct AircraftSnapshot {
    /// epoch seconds of this snapshot
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub now: Option<f64>,

    /// total number of messages received so far
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub messages: Option<u64>,

    #[serde(default)]
    pub aircraft: Vec<Aircraft>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

impl AircraftSnapshot {
    pub fn new (aircraft: Vec<Aircraft>)->Self {
        AircraftSnapshot { aircraft, ..Default::default() }
    }

    pub fn timestamp (&self)->Option<EpochMillis> {
        self.now.map( EpochMillis::from_secs_f64)
    }

    pub fn with_position (&self)->impl Iterator<Item=&Aircraft> {
        self.aircraft.iter().filter( |a| a.has_position())
    }
}

/// the contents of `receiver.json`
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct ReceiverInfo {
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub lat: Option<f64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub lon: Option<f64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

impl ReceiverInfo {
    pub fn new (lat: f64, lon: f64)->Self {
        ReceiverInfo { lat: Some(lat), lon: Some(lon), ..Default::default() }
    }

    /// the receiver location all distance and bearing queries are relative to.
    /// Receivers without configured location report missing or zero coordinates. A zero in either one of them is
    /// treated as unset, hence points on the equator or the prime meridian are rejected
    pub fn reference_point (&self)->Result<GeoPoint> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() && lon != 0.0 && lat != 0.0 => {
                Ok( GeoPoint::from_lon_lat_degrees( lon, lat))
            }
            _ => Err( precondition_error("Receiver location cannot be determined from feeder data"))
        }
    }
}

/// one aggregation period in `stats.json` ("total", "last1min" etc.)
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct StatsPeriod {
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub messages: Option<u64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub aircraft_with_pos: Option<u64>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub aircraft_without_pos: Option<u64>,

    /// maximum distance in meters
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub max_distance: Option<f64>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

/// the contents of `stats.json`
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct ReceiverStats {
    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub total: Option<StatsPeriod>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub last1min: Option<StatsPeriod>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub last5min: Option<StatsPeriod>,

    #[serde(skip_serializing_if = "odin_common::is_none")]
    pub last15min: Option<StatsPeriod>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

impl ReceiverStats {
    /// CPU load if the receiver reports one (readsb only does so in some configurations)
    pub fn cpu_load (&self)->Option<&Value> {
        self.other.get("cpu").and_then( |cpu| cpu.get("load"))
    }
}

/* #endregion snapshot, receiver and stats */
